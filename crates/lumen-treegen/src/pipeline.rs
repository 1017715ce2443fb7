/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2025 The Lumen project
 */
//! Maps a frozen schema to generated files, and the files to disk.

use std::path::{Path, PathBuf};

use lumen_tree::{resolver::resolve, TreeContext};

use crate::{
    error::{GenError, PipelineError},
    printer::{builder, element, implementation, visitor, GeneratedFile},
};

///Renders every unit of the frozen `ctx`, in registration order: element
/// declarations, implementations, leaf builders, intermediate builders, and
/// the protocol units last. The order is part of the deterministic output
/// contract.
pub fn generate_all(ctx: &TreeContext) -> Result<Vec<GeneratedFile>, GenError> {
    assert!(ctx.is_frozen(), "generation needs a finalized schema");
    let tree = resolve(ctx)?;

    let mut files = Vec::new();
    for key in ctx.elements() {
        files.push(element::generate(ctx, &tree, key)?);
    }
    for imp in ctx.implementations() {
        files.push(implementation::generate(ctx, &tree, imp)?);
    }
    for leaf in ctx.leaf_builders() {
        files.push(builder::generate_leaf(ctx, &tree, leaf)?);
    }
    for intermediate in ctx.intermediate_builders() {
        files.push(builder::generate_intermediate(ctx, intermediate)?);
    }
    files.push(visitor::generate_visitor(ctx));
    files.push(visitor::generate_visitor_void(ctx));
    files.push(visitor::generate_transformer(ctx));

    log::debug!("rendered {} units", files.len());
    Ok(files)
}

///How [Pipeline::execute] treats the files on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    ///Write every unit whose text differs from disk.
    Write,
    ///Write nothing, only report units whose on-disk text is stale.
    Check,
}

#[derive(Debug, Default)]
pub struct Summary {
    pub written: usize,
    pub unchanged: usize,
    pub stale: Vec<PathBuf>,
}

///An executable generation pipeline: frozen schema in, files on disk out.
///
/// Whether an out-of-date file is overwritten or only reported is the
/// pipeline's policy, the printers never touch the filesystem.
pub struct Pipeline {
    pub output_root: PathBuf,
    pub mode: WriteMode,
}

impl Pipeline {
    pub fn new(output_root: &dyn AsRef<Path>) -> Self {
        Pipeline {
            output_root: output_root.as_ref().to_path_buf(),
            mode: WriteMode::Write,
        }
    }

    pub fn check_only(mut self) -> Self {
        self.mode = WriteMode::Check;
        self
    }

    pub fn execute(&self, ctx: &TreeContext) -> Result<Summary, PipelineError> {
        let files = generate_all(ctx)?;
        let mut summary = Summary::default();

        for file in files {
            let target = self.output_root.join(&file.path);
            //regenerate-and-diff, identical text is never rewritten
            let on_disk = std::fs::read_to_string(&target).ok();
            if on_disk.as_deref() == Some(file.text.as_str()) {
                summary.unchanged += 1;
                continue;
            }
            match self.mode {
                WriteMode::Write => {
                    if let Some(parent) = target.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&target, &file.text)?;
                    log::info!("wrote {}", target.display());
                    summary.written += 1;
                }
                WriteMode::Check => summary.stale.push(target),
            }
        }
        Ok(summary)
    }
}
