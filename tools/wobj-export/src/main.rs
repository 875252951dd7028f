//! wobj - WOBJ scene exporter
//!
//! Converts a glTF/GLB/OBJ scene and a `.wmf` material file into a single
//! `.wobj` container, and dumps existing containers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use wobj_export::{
    ExportConfig, ExportJob, IndexBase, PathOverflow, WOBJ_FORMAT, export, read_wobj_file,
};

#[derive(Parser)]
#[command(name = "wobj")]
#[command(about = "WOBJ scene export tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a scene and its material file to a .wobj container
    Export {
        /// Input scene file (glTF/GLB/OBJ)
        scene: PathBuf,

        /// Material file (default: scene path with .wmf extension)
        material: Option<PathBuf>,

        /// Output .wobj file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Exporter configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// How mesh indices are based in the merged vertex array
        #[arg(long, value_enum)]
        index_base: Option<IndexBase>,

        /// Fail if the material file does not exist
        #[arg(long)]
        require_material: bool,

        /// Truncate material paths longer than 255 bytes instead of failing
        #[arg(long)]
        truncate_paths: bool,
    },

    /// Print the header and contents of a .wobj container
    Inspect {
        /// Input .wobj file
        input: PathBuf,

        /// Number of vertices to print
        #[arg(short, long, default_value_t = 0)]
        vertices: usize,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            scene,
            material,
            output,
            config,
            index_base,
            require_material,
            truncate_paths,
        } => {
            let mut config = match config {
                Some(path) => ExportConfig::load(&path)?,
                None => ExportConfig::default(),
            };
            if let Some(index_base) = index_base {
                config.export.index_base = index_base;
            }
            if require_material {
                config.materials.required = true;
            }
            if truncate_paths {
                config.materials.path_overflow = PathOverflow::Truncate;
            }

            let job = ExportJob {
                scene,
                material,
                output,
            };
            export(&job, &config)?;
            tracing::info!("Done!");
        }

        Commands::Inspect { input, vertices } => {
            let file = read_wobj_file(&input)?;
            let header = &file.header;

            println!("{} ({})", input.display(), WOBJ_FORMAT.version_tag());
            println!("  indices:  {} @ {}", header.index_count, header.index_offset);
            println!("  vertices: {} @ {}", header.vertex_count, header.vertex_offset);
            for (slot, path) in header.materials.iter() {
                if path.is_unset() {
                    println!("  {:<10} (unset)", slot.name());
                } else {
                    println!("  {:<10} {}", slot.name(), path);
                }
            }
            for (i, v) in file.vertices.iter().take(vertices).enumerate() {
                println!(
                    "  [{}] pos={:?} tan={:?} bitan={:?} normal={:?} uv={:?}",
                    i,
                    v.position.to_array(),
                    v.tangent.to_array(),
                    v.bitangent.to_array(),
                    v.normal.to_array(),
                    v.uv.to_array()
                );
            }
        }
    }

    Ok(())
}
