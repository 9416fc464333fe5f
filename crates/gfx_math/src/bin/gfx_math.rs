use anyhow::Result;

#[cfg(feature = "cli")]
mod main {
    use super::*;
    use anyhow::bail;
    use clap::{Parser, Subcommand};
    use gfx_math::{TransformChain, Vector4, io::ensure_file_writable};
    use std::path::PathBuf;

    #[derive(Debug, Parser)]
    #[command(about = "Evaluate chains of 4x4 transform matrices", long_about = None)]
    struct Cli {
        #[command(subcommand)]
        command: Command,
    }

    #[derive(Debug, Subcommand)]
    enum Command {
        /// Evaluate a transform chain and print the resulting matrix
        Eval {
            /// Path to RON file containing the transform chain
            #[arg(short, long)]
            chain: PathBuf,
            /// Homogeneous point (x y z w) to transform with the matrix
            #[arg(short, long, num_args = 4, value_names = ["X", "Y", "Z", "W"], allow_negative_numbers = true)]
            point: Option<Vec<f64>>,
            /// Print the column-major elements in single precision
            #[arg(long)]
            f32: bool,
        },
        /// Generate an example transform chain file
        ExampleChain {
            /// Path where the file should be written
            #[arg(short, long)]
            output_path: PathBuf,
            /// Overwrite any existing file at the given path
            #[arg(short, long)]
            force_overwrite: bool,
        },
    }

    pub fn main() -> Result<()> {
        env_logger::init();

        let cli = Cli::parse();

        match cli.command {
            Command::Eval { chain, point, f32 } => {
                let transform_chain = TransformChain::from_ron_file(&chain)?;
                log::info!(
                    "Loaded transform chain with {} steps from {}",
                    transform_chain.steps().len(),
                    chain.display()
                );

                let matrix = transform_chain.evaluate();
                log::info!("Evaluated transform chain");

                println!("{matrix}");

                if f32 {
                    println!("{:?}", matrix.to_column_major_f32());
                } else {
                    println!("{:?}", matrix.as_column_major_array());
                }

                if let Some(point) = point {
                    let &[x, y, z, w] = point.as_slice() else {
                        bail!("Expected 4 point coordinates, got {}", point.len());
                    };
                    let transformed = matrix * Vector4::new(x, y, z, w);
                    println!("{transformed:?}");
                }
                Ok(())
            }
            Command::ExampleChain {
                output_path,
                force_overwrite,
            } => {
                ensure_file_writable(&output_path, force_overwrite)?;
                TransformChain::example().write_ron_file(&output_path)?;
                log::info!("Wrote example transform chain to {}", output_path.display());
                Ok(())
            }
        }
    }
}

#[cfg(not(feature = "cli"))]
mod main {
    use super::*;

    pub fn main() -> Result<()> {
        anyhow::bail!("This binary requires the `cli` feature to be enabled.")
    }
}

fn main() -> Result<()> {
    main::main()
}
