//! Node tree → dialect markdown rendering.
//!
//! One engine serves every dialect: [`MarkdownRenderer`] walks the tree and
//! looks up tag vocabulary, escaping and paragraph heuristics in the active
//! [`DialectConfig`]. Output only ever appends to the [`LineWriter`]; the one
//! place that inspects rendered bytes is the two-pass table cell path.

use std::io::Write;

use tracing::{debug, trace};

use crate::error::Result;
use crate::nodes::{
    Code, Grid, GridCell, Header, Image, Import, Infobox, ItemsList, List, Node, NodeKind,
    Survey, Text, Url, YouTube,
};
use crate::options::{RenderOptions, Scope};

use super::dialect::{DialectConfig, ImportStyle, TagPair};
use super::escape::{
    base_name, calculate_fence_length, escape_angle_brackets, escape_link_destination,
    quote_attr,
};
use super::writer::LineWriter;

/// Render `nodes` as markdown in the dialect and environment of `options`.
///
/// Nodes whose environments exclude the active one are skipped together with
/// their subtree. The only errors are sink failures and excessive nesting.
///
/// ```
/// use labdown::nodes::{Node, Text};
/// use labdown::{Dialect, RenderOptions, render};
///
/// let mut out = Vec::new();
/// let doc = vec![Node::from(Text::new("hello").bold())];
/// render(&mut out, &RenderOptions::new(Dialect::Qwiklabs), &doc)?;
/// assert_eq!(out, b"**hello**");
/// # Ok::<(), labdown::Error>(())
/// ```
pub fn render(out: &mut dyn Write, options: &RenderOptions, nodes: &[Node]) -> Result<()> {
    debug!(
        dialect = %options.dialect,
        env = options.env().unwrap_or(""),
        roots = nodes.len(),
        "rendering markdown"
    );
    let mut renderer = MarkdownRenderer::new(options, LineWriter::new(out));
    renderer.write_nodes(nodes, Scope::default())?;
    debug!("markdown rendering finished");
    Ok(())
}

/// Render to an owned string.
pub fn render_to_string(options: &RenderOptions, nodes: &[Node]) -> Result<String> {
    let mut buf = Vec::new();
    render(&mut buf, options, nodes)?;
    Ok(String::from_utf8(buf)?)
}

/// Rendering state for one call: the options, the dialect they select, and
/// the output cursor.
struct MarkdownRenderer<'a, 'w> {
    options: &'a RenderOptions,
    config: &'static DialectConfig,
    out: LineWriter<'w>,
}

impl<'a, 'w> MarkdownRenderer<'a, 'w> {
    fn new(options: &'a RenderOptions, out: LineWriter<'w>) -> Self {
        Self {
            options,
            config: options.dialect.config(),
            out,
        }
    }

    fn write_nodes(&mut self, nodes: &[Node], scope: Scope) -> Result<()> {
        for node in nodes {
            if !node.envs().matches(self.options.env()) {
                trace!(envs = node.envs().len(), "skipping node outside active env");
                continue;
            }
            let scope = scope.descend(self.options.max_depth)?;
            match &node.kind {
                NodeKind::Text(text) => self.text(text)?,
                NodeKind::Image(image) => self.image(image)?,
                NodeKind::Url(url) => self.url(url, scope)?,
                NodeKind::Button(button) => self.write_nodes(&button.content, scope)?,
                NodeKind::Code(code) => self.code(code)?,
                NodeKind::List(list) => self.list(node, list, scope)?,
                NodeKind::ItemsList(list) => self.items_list(node, list, scope)?,
                NodeKind::Grid(grid) => self.grid(grid, scope)?,
                NodeKind::Infobox(infobox) => self.infobox(infobox, scope)?,
                NodeKind::Survey(survey) => self.survey(survey)?,
                NodeKind::Header(header) => self.header(header, scope)?,
                NodeKind::YouTube(video) => self.youtube(video)?,
                NodeKind::Import(import) => self.import(import, scope)?,
                NodeKind::Unsupported => trace!("skipping unsupported node"),
            }
        }
        Ok(())
    }

    fn write_open(&mut self, tags: &[TagPair]) -> Result<()> {
        for tag in tags {
            self.out.write_str(tag.open)?;
        }
        Ok(())
    }

    fn write_close(&mut self, tags: &[TagPair]) -> Result<()> {
        for tag in tags.iter().rev() {
            self.out.write_str(tag.close)?;
        }
        Ok(())
    }

    fn text(&mut self, text: &Text) -> Result<()> {
        let edge = self.config.edge_whitespace();
        let value = text.value.as_str();
        let rest = value.trim_start_matches(edge);
        let left = &value[..value.len() - rest.len()];
        let core = rest.trim_end_matches(edge);
        let right = &rest[core.len()..];

        let rules: Vec<_> = self
            .config
            .boundary_rules
            .iter()
            .filter(|rule| rule.matches(core))
            .collect();

        for rule in &rules {
            self.out.newlines(rule.before)?;
        }
        self.out.write_str(left)?;

        if !core.is_empty() {
            let markers: Vec<TagPair> = [
                (text.bold, self.config.bold),
                (text.italic, self.config.italic),
                (text.code, self.config.code),
            ]
            .into_iter()
            .filter_map(|(on, tag)| on.then_some(tag))
            .collect();

            self.write_open(&markers)?;
            if self.config.escape_angle_brackets {
                self.out.write_str(&escape_angle_brackets(core))?;
            } else {
                self.out.write_str(core)?;
            }
            self.write_close(&markers)?;
        }

        for rule in &rules {
            self.out.newlines(rule.after)?;
        }
        self.out.write_str(right)?;
        Ok(())
    }

    fn image(&mut self, image: &Image) -> Result<()> {
        self.out.space()?;

        let mut tag = String::from("<img ");
        tag.push_str(&format!("src={} ", quote_attr(&image.src)));

        let alt = match image.alt.as_deref() {
            Some(alt) if !alt.is_empty() => alt,
            _ => base_name(&image.src),
        };
        tag.push_str(&format!("alt={} ", quote_attr(alt)));

        if let Some(title) = image.title.as_deref().filter(|t| !t.is_empty()) {
            tag.push_str(&format!("title={} ", quote_attr(title)));
        }
        if let Some(width) = image.width.filter(|w| *w > 0.0) {
            tag.push_str(&format!(" width=\"{width:.2}\" "));
        }
        tag.push_str("/>\n\n");

        self.out.write_str(&tag)?;
        Ok(())
    }

    fn url(&mut self, url: &Url, scope: Scope) -> Result<()> {
        if url.url.is_empty() {
            return self.write_nodes(&url.content, scope);
        }

        let button = url.is_button().then_some(self.config.button);
        if let Some(tag) = button {
            self.out.write_str(tag.open)?;
        }
        self.out.write_str("[")?;
        self.write_nodes(&url.content, scope)?;
        self.out.write_str("](")?;
        self.out.write_str(&escape_link_destination(&url.url))?;
        self.out.write_str(")")?;
        if let Some(tag) = button {
            self.out.write_str(tag.close)?;
        }
        Ok(())
    }

    fn code(&mut self, code: &Code) -> Result<()> {
        if code.is_empty() {
            return Ok(());
        }
        self.out.new_block()?;

        let close = if code.term {
            if self.config.needs_console_wrapper(&code.value) {
                self.out.write_str("\n")?;
                self.out.write_str(self.config.console_block.open)?;
                Some(self.config.console_block.close.to_string())
            } else {
                None
            }
        } else {
            let fence = "`".repeat(calculate_fence_length(&code.value, '`'));
            self.out.write_str(&fence)?;
            self.out.write_str(&code.lang)?;
            Some(fence)
        };

        self.out.write_str("\n")?;
        self.out.write_str(&code.value)?;
        self.out.newline_if_needed()?;
        if let Some(close) = close {
            self.out.write_str(&close)?;
        }
        self.out.write_str("\n")?;
        self.out.write_str("\n")?;
        Ok(())
    }

    fn list(&mut self, node: &Node, list: &List, scope: Scope) -> Result<()> {
        if node.is_block() && !scope.in_list && !scope.in_table_cell {
            self.out.new_block()?;
        }
        self.write_nodes(&list.nodes, scope)?;
        if !scope.in_table_cell {
            self.out.newline_if_needed()?;
        }
        Ok(())
    }

    fn items_list(&mut self, node: &Node, list: &ItemsList, scope: Scope) -> Result<()> {
        let nested = scope.in_list;
        let restore_prefix = if nested {
            // Nested items continue the parent item, indented under it.
            self.out.newline_if_needed()?;
            let indent = format!("{}  ", self.out.prefix());
            Some(self.out.set_prefix(indent))
        } else {
            if node.is_block() {
                self.out.new_block()?;
            }
            if self.config.list_leading_break {
                self.out.write_str("\n")?;
            }
            None
        };

        let item_scope = scope.in_list();
        for (index, item) in list.items.iter().enumerate() {
            self.out.write_str(&list.marker(index))?;
            self.write_nodes(item, item_scope)?;
            self.out.newline_if_needed()?;
        }

        match restore_prefix {
            Some(prefix) => {
                self.out.set_prefix(prefix);
            }
            None => self.out.write_str("\n")?,
        }
        Ok(())
    }

    fn grid(&mut self, grid: &Grid, scope: Scope) -> Result<()> {
        if grid.is_empty() {
            return Ok(());
        }

        self.out.write_str("\n")?;
        let max_cols = grid.max_cols();
        let cell_scope = scope.in_table_cell();

        for (row_index, row) in grid.rows.iter().enumerate() {
            self.out.write_str("|")?;
            for cell in row {
                self.out.write_str(" ")?;
                self.cell(cell, cell_scope)?;
                self.out.write_str(" |")?;
            }
            if row_index == 0 {
                for _ in row.len()..max_cols {
                    self.out.write_str(" |")?;
                }
            }
            self.out.write_str("\n")?;

            // Header bottom border
            if row_index == 0 {
                self.out.write_str("|")?;
                for _ in 0..max_cols {
                    self.out.write_str(" --- |")?;
                }
                self.out.write_str("\n")?;
            }
        }
        Ok(())
    }

    /// Write one cell's content on the current row.
    ///
    /// The content is first rendered through this dialect into a scratch
    /// buffer. A newline there would break the row, so in that case each child
    /// is rendered again as inline HTML with its newlines stripped.
    fn cell(&mut self, cell: &GridCell, scope: Scope) -> Result<()> {
        let mut scratch = Vec::new();
        MarkdownRenderer::new(self.options, LineWriter::mid_line(&mut scratch))
            .write_nodes(&cell.content, scope)?;

        if memchr::memchr(b'\n', &scratch).is_none() {
            self.out.write_bytes(&scratch)?;
            return Ok(());
        }

        debug!(
            children = cell.content.len(),
            "table cell spans lines, re-rendering as inline HTML"
        );
        for node in &cell.content {
            let mut html = Vec::new();
            crate::html::render_node(&mut html, self.options, node, scope.force_inline())?;
            html.retain(|&b| b != b'\n');
            self.out.write_bytes(&html)?;
        }
        Ok(())
    }

    fn infobox(&mut self, infobox: &Infobox, scope: Scope) -> Result<()> {
        self.out.new_block()?;
        let tags = self.config.infobox(infobox.kind);
        self.out.write_str(tags.open)?;
        self.out.write_str("\n")?;

        let nested = format!("{}{}", self.out.prefix(), self.config.infobox_prefix);
        let previous = self.out.set_prefix(nested);
        let result = self.write_nodes(&infobox.content, scope);
        self.out.set_prefix(previous);
        result?;

        self.out.write_str(tags.close)?;
        self.out.write_str("\n")?;
        Ok(())
    }

    fn survey(&mut self, survey: &Survey) -> Result<()> {
        self.out.new_block()?;
        self.out.write_str("<form>\n")?;
        for group in &survey.groups {
            self.out.write_str("<name>")?;
            self.out.write_escaped(&group.name)?;
            self.out.write_str("</name>\n")?;
            for option in &group.options {
                self.out.write_str("<input value=\"")?;
                self.out.write_escaped(option)?;
                self.out.write_str("\">\n")?;
            }
        }
        self.out.write_str("</form>")?;
        Ok(())
    }

    fn header(&mut self, header: &Header, scope: Scope) -> Result<()> {
        self.out.new_block()?;
        self.out.write_str(&"#".repeat(header.hashes()))?;
        self.out.write_str(" ")?;
        self.write_nodes(&header.content, scope)?;
        self.out.newline_if_needed()?;
        Ok(())
    }

    fn youtube(&mut self, video: &YouTube) -> Result<()> {
        // The embed always starts its own block, list item or not.
        self.out.new_block()?;
        self.out.newlines(self.config.video_gap)?;
        self.out.write_str("<ql-video youtubeId=\"")?;
        self.out.write_escaped(&video.video_id)?;
        self.out.write_str("\"></ql-video>")?;
        Ok(())
    }

    fn import(&mut self, import: &Import, scope: Scope) -> Result<()> {
        if import.content.is_empty() {
            return Ok(());
        }
        match self.config.import_style {
            ImportStyle::Reference => {
                self.out.new_block()?;
                self.out.write_str("[[import ")?;
                self.out.write_str(import.display_title())?;
                self.out.write_str("]]")?;
            }
            ImportStyle::Inline => {
                self.write_nodes(&import.content, scope)?;
                self.out.write_str("\n")?;
            }
        }
        Ok(())
    }
}
