//! Indented text rendering of a finished tree.

use std::fmt::Write;

use crate::node::DirNode;

/// Indent step per depth level, in spaces.
const INDENT_WIDTH: usize = 4;

impl DirNode {
    /// Render the tree as indented text.
    ///
    /// Depth-first, pre-order: one `|- name (size)` line for the directory,
    /// then its files, then its subdirectories, each level indented by
    /// another four spaces. Deterministic for a given node value.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(0, &mut out, &|size| size.to_string());
        out
    }

    /// Like [`render`](Self::render), with human-readable sizes.
    pub fn render_human(&self) -> String {
        let mut out = String::new();
        self.render_into(0, &mut out, &|size| {
            humansize::format_size(size, humansize::BINARY)
        });
        out
    }

    fn render_into(&self, indent: usize, out: &mut String, fmt: &dyn Fn(u64) -> String) {
        let _ = writeln!(out, "{:indent$}|- {} ({})", "", self.name, fmt(self.size));
        for file in &self.files {
            let _ = writeln!(
                out,
                "{:width$}|- {} ({})",
                "",
                file.name,
                fmt(file.size),
                width = indent + INDENT_WIDTH
            );
        }
        for dir in &self.dirs {
            dir.render_into(indent + INDENT_WIDTH, out, fmt);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::node::{DirNode, FileEntry};

    #[test]
    fn test_single_node_render() {
        let node = DirNode::new("root", 4096);
        assert_eq!(node.render(), "|- root (4096)\n");
    }

    #[test]
    fn test_files_precede_subdirectories() {
        let node = DirNode {
            name: "top".into(),
            size: 30,
            dirs: vec![DirNode::new("sub", 10)],
            files: vec![FileEntry::new("file", 5)],
        };
        let rendered = node.render();
        let file_pos = rendered.find("|- file").unwrap();
        let dir_pos = rendered.find("|- sub").unwrap();
        assert!(file_pos < dir_pos);
    }

    #[test]
    fn test_human_render_formats_sizes() {
        let node = DirNode::new("root", 2048);
        let rendered = node.render_human();
        assert!(rendered.contains("KiB"));
    }
}
