/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2025 The Lumen project
 */
//! # Lumen-Treegen-cli
//!
//! CLI interface to `lumen-treegen`

use clap::Parser;
use lumen_treegen::pipeline::Pipeline;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lumen-treegen-cli")]
#[command(version, about, long_about = "Generates the Lumen compiler tree sources")]
struct Args {
    ///Writes nothing, only reports generated files whose on-disk text is
    /// stale.
    #[arg(long, default_value_t = false)]
    check: bool,

    ///Prints the relative path of every unit instead of writing anything.
    #[arg(long, default_value_t = false)]
    list: bool,

    ///Root directory the generated sources are written to.
    #[arg()]
    output_root: PathBuf,
}

fn main() {
    pretty_env_logger::init();
    let args = Args::parse();

    let ctx = match lumen_treegen::schema::lumen_tree() {
        Ok(ctx) => ctx,
        Err(e) => {
            log::error!("tree schema is inconsistent: {e}");
            std::process::exit(1);
        }
    };

    if args.list {
        match lumen_treegen::generate_all(&ctx) {
            Ok(files) => {
                for file in files {
                    println!("{}", file.path.display());
                }
            }
            Err(e) => {
                log::error!("generation failed: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let mut pipeline = Pipeline::new(&args.output_root);
    if args.check {
        pipeline = pipeline.check_only();
    }

    match pipeline.execute(&ctx) {
        Ok(summary) => {
            if !summary.stale.is_empty() {
                for stale in &summary.stale {
                    println!("stale: {}", stale.display());
                }
                std::process::exit(1);
            }
            println!("{} written, {} unchanged", summary.written, summary.unchanged);
        }
        Err(e) => {
            log::error!("generation failed: {e}");
            std::process::exit(1);
        }
    }
}
