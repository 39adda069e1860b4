//! Emitter — deterministic assembly of output artifacts.
//!
//! Identical metadata input must produce byte-identical output regardless of
//! process, thread, or prior cache state; the driver's incremental equality
//! check depends on it. Assembly order is fixed: header boilerplate,
//! namespace wrapper (omitted when the root has none), type declaration, then
//! one block per member/decorator/handler in declared order. No timestamps,
//! no environment, no iteration over unordered sets.

pub mod types;

pub use types::{Artifact, EmissionUnit};

use stencil_core::EmitError;

use crate::resolver::ResolvedMetadata;
use crate::validate::RootPlan;

/// Renders one root (plus its correlated satellites) to text.
///
/// This is the seam to the template collaborator: the pipeline owns *what*
/// is rendered and in which order, renderers own the block bodies. Returning
/// `Ok(None)` means there is nothing to emit for this root — an empty
/// satellite set or no usable members — which is not an error.
pub trait Renderer: Send + Sync {
    fn render(
        &self,
        root: &ResolvedMetadata,
        satellites: &[&ResolvedMetadata],
        plan: &RootPlan,
    ) -> Result<Option<Artifact>, EmitError>;
}

const HEADER: &str = "// <auto-generated/>\n// Generated by stencil. Edits will be overwritten.\n";

/// Assemble an artifact into its final text.
pub fn compose(artifact: &Artifact) -> EmissionUnit {
    let mut text = String::with_capacity(256);
    text.push_str(HEADER);

    let (type_indent, block_indent) = match &artifact.namespace {
        Some(namespace) => {
            text.push('\n');
            text.push_str(&format!("namespace {namespace}\n{{\n"));
            ("    ", "        ")
        }
        None => {
            text.push('\n');
            ("", "    ")
        }
    };

    text.push_str(&format!("{}{}\n{}{{\n", type_indent, artifact.type_decl, type_indent));
    for (index, block) in artifact.blocks.iter().enumerate() {
        if index > 0 {
            text.push('\n');
        }
        for line in block.lines() {
            if line.is_empty() {
                text.push('\n');
            } else {
                text.push_str(block_indent);
                text.push_str(line);
                text.push('\n');
            }
        }
    }
    text.push_str(&format!("{type_indent}}}\n"));

    if artifact.namespace.is_some() {
        text.push_str("}\n");
    }

    EmissionUnit {
        hint_name: artifact.hint_name.clone(),
        text,
    }
}
