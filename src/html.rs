//! Node tree → HTML fragment rendering.
//!
//! The markdown renderer falls back to this path for table cells whose
//! markdown would span several lines: HTML can express lists, code and
//! paragraphs without newlines. In inline mode block nodes emit no line
//! breaks of their own and text newlines become `<br>`.
//!
//! ```
//! use labdown::html;
//! use labdown::nodes::{ItemsList, Node};
//! use labdown::RenderOptions;
//!
//! let list = ItemsList::unordered(vec![vec![Node::text("a")], vec![Node::text("b")]]);
//! let mut out = Vec::new();
//! html::render_inline(&mut out, &RenderOptions::default(), &[list.into()])?;
//! assert_eq!(out, b"<ul><li>a</li><li>b</li></ul>");
//! # Ok::<(), labdown::Error>(())
//! ```

use std::io::Write;

use tracing::trace;

use crate::error::Result;
use crate::markdown::{LineWriter, escape_html};
use crate::nodes::{
    Code, Grid, Header, Image, Infobox, InfoboxKind, ItemsList, List, ListType, Node, NodeKind,
    Survey, Text, Url, YouTube,
};
use crate::options::{RenderOptions, Scope};

/// Render `nodes` as an HTML fragment, one block element per line.
pub fn render(out: &mut dyn Write, options: &RenderOptions, nodes: &[Node]) -> Result<()> {
    HtmlRenderer::new(options, out).write_nodes(nodes, Scope::default())
}

/// Render `nodes` as a single-line HTML fragment.
pub fn render_inline(out: &mut dyn Write, options: &RenderOptions, nodes: &[Node]) -> Result<()> {
    HtmlRenderer::new(options, out).write_nodes(nodes, Scope::default().force_inline())
}

/// Render one node within an enclosing traversal, keeping its depth and flags.
pub(crate) fn render_node(
    out: &mut dyn Write,
    options: &RenderOptions,
    node: &Node,
    scope: Scope,
) -> Result<()> {
    HtmlRenderer::new(options, out).write_nodes(std::slice::from_ref(node), scope)
}

struct HtmlRenderer<'a, 'w> {
    options: &'a RenderOptions,
    out: LineWriter<'w>,
}

impl<'a, 'w> HtmlRenderer<'a, 'w> {
    fn new(options: &'a RenderOptions, out: &'w mut dyn Write) -> Self {
        Self {
            options,
            out: LineWriter::new(out),
        }
    }

    fn write_nodes(&mut self, nodes: &[Node], scope: Scope) -> Result<()> {
        for node in nodes {
            if !node.envs().matches(self.options.env()) {
                continue;
            }
            let scope = scope.descend(self.options.max_depth)?;
            match &node.kind {
                NodeKind::Text(text) => self.text(text, scope)?,
                NodeKind::Image(image) => self.image(image)?,
                NodeKind::Url(url) => self.url(url, scope)?,
                NodeKind::Button(button) => {
                    self.out.write_str("<button>")?;
                    self.write_nodes(&button.content, scope)?;
                    self.out.write_str("</button>")?;
                }
                NodeKind::Code(code) => self.code(code, scope)?,
                NodeKind::List(list) => self.list(node, list, scope)?,
                NodeKind::ItemsList(list) => self.items_list(list, scope)?,
                NodeKind::Grid(grid) => self.grid(grid, scope)?,
                NodeKind::Infobox(infobox) => self.infobox(infobox, scope)?,
                NodeKind::Survey(survey) => self.survey(survey, scope)?,
                NodeKind::Header(header) => self.header(header, scope)?,
                NodeKind::YouTube(video) => self.youtube(video, scope)?,
                NodeKind::Import(import) => self.write_nodes(&import.content, scope)?,
                NodeKind::Unsupported => trace!("skipping unsupported node"),
            }
        }
        Ok(())
    }

    /// Line break after a block element, unless rendering inline.
    fn block_end(&mut self, scope: Scope) -> Result<()> {
        if !scope.force_inline {
            self.out.write_str("\n")?;
        }
        Ok(())
    }

    fn text(&mut self, text: &Text, scope: Scope) -> Result<()> {
        let tags: Vec<&str> = [(text.bold, "strong"), (text.italic, "em"), (text.code, "code")]
            .into_iter()
            .filter_map(|(on, tag)| on.then_some(tag))
            .collect();

        for tag in &tags {
            self.out.write_str(&format!("<{tag}>"))?;
        }
        let escaped = escape_html(&text.value);
        if scope.force_inline {
            self.out.write_str(&escaped.replace('\n', "<br>"))?;
        } else {
            self.out.write_str(&escaped)?;
        }
        for tag in tags.iter().rev() {
            self.out.write_str(&format!("</{tag}>"))?;
        }
        Ok(())
    }

    fn image(&mut self, image: &Image) -> Result<()> {
        let alt = match image.alt.as_deref() {
            Some(alt) if !alt.is_empty() => alt,
            _ => crate::markdown::base_name(&image.src),
        };
        let mut tag = format!(
            "<img src=\"{}\" alt=\"{}\"",
            escape_html(&image.src),
            escape_html(alt)
        );
        if let Some(title) = image.title.as_deref().filter(|t| !t.is_empty()) {
            tag.push_str(&format!(" title=\"{}\"", escape_html(title)));
        }
        if let Some(width) = image.width.filter(|w| *w > 0.0) {
            tag.push_str(&format!(" style=\"width: {width:.2}px\""));
        }
        tag.push('>');
        self.out.write_str(&tag)?;
        Ok(())
    }

    fn url(&mut self, url: &Url, scope: Scope) -> Result<()> {
        if url.url.is_empty() {
            return self.write_nodes(&url.content, scope);
        }
        self.out
            .write_str(&format!("<a href=\"{}\"", escape_html(&url.url)))?;
        if let Some(target) = url.target.as_deref().filter(|t| !t.is_empty()) {
            self.out
                .write_str(&format!(" target=\"{}\"", escape_html(target)))?;
        }
        self.out.write_str(">")?;
        self.write_nodes(&url.content, scope)?;
        self.out.write_str("</a>")?;
        Ok(())
    }

    fn code(&mut self, code: &Code, scope: Scope) -> Result<()> {
        if code.is_empty() {
            return Ok(());
        }
        if code.term {
            self.out.write_str("<pre><code class=\"console\">")?;
        } else if code.lang.is_empty() {
            self.out.write_str("<pre><code>")?;
        } else {
            self.out.write_str(&format!(
                "<pre><code class=\"language-{}\">",
                escape_html(&code.lang)
            ))?;
        }
        let body = escape_html(&code.value);
        if scope.force_inline {
            self.out.write_str(&body.replace('\n', "<br>"))?;
        } else {
            self.out.write_str(&body)?;
        }
        self.out.write_str("</code></pre>")?;
        self.block_end(scope)
    }

    fn list(&mut self, node: &Node, list: &List, scope: Scope) -> Result<()> {
        if scope.force_inline || !node.is_block() {
            return self.write_nodes(&list.nodes, scope);
        }
        self.out.write_str("<p>")?;
        self.write_nodes(&list.nodes, scope)?;
        self.out.write_str("</p>")?;
        self.block_end(scope)
    }

    fn items_list(&mut self, list: &ItemsList, scope: Scope) -> Result<()> {
        let close = match list.list_type {
            ListType::Ordered if list.start > 0 => {
                self.out
                    .write_str(&format!("<ol start=\"{}\">", list.start))?;
                "</ol>"
            }
            ListType::Ordered => {
                self.out.write_str("<ol>")?;
                "</ol>"
            }
            ListType::Unordered => {
                self.out.write_str("<ul>")?;
                "</ul>"
            }
        };
        self.block_end(scope)?;

        let item_scope = scope.in_list();
        for item in &list.items {
            self.out.write_str("<li>")?;
            self.write_nodes(item, item_scope)?;
            self.out.write_str("</li>")?;
            self.block_end(scope)?;
        }

        self.out.write_str(close)?;
        self.block_end(scope)
    }

    fn grid(&mut self, grid: &Grid, scope: Scope) -> Result<()> {
        if grid.is_empty() {
            return Ok(());
        }
        self.out.write_str("<table>")?;
        self.block_end(scope)?;

        let cell_scope = scope.in_table_cell();
        for row in &grid.rows {
            self.out.write_str("<tr>")?;
            for cell in row {
                let mut tag = String::from("<td");
                if cell.colspan > 1 {
                    tag.push_str(&format!(" colspan=\"{}\"", cell.colspan));
                }
                if cell.rowspan > 1 {
                    tag.push_str(&format!(" rowspan=\"{}\"", cell.rowspan));
                }
                tag.push('>');
                self.out.write_str(&tag)?;
                self.write_nodes(&cell.content, cell_scope)?;
                self.out.write_str("</td>")?;
            }
            self.out.write_str("</tr>")?;
            self.block_end(scope)?;
        }

        self.out.write_str("</table>")?;
        self.block_end(scope)
    }

    fn infobox(&mut self, infobox: &Infobox, scope: Scope) -> Result<()> {
        let class = match infobox.kind {
            InfoboxKind::Positive => "special",
            InfoboxKind::Negative => "warning",
        };
        self.out
            .write_str(&format!("<aside class=\"{class}\">"))?;
        self.write_nodes(&infobox.content, scope)?;
        self.out.write_str("</aside>")?;
        self.block_end(scope)
    }

    fn survey(&mut self, survey: &Survey, scope: Scope) -> Result<()> {
        self.out.write_str("<form>")?;
        for group in &survey.groups {
            let name = escape_html(&group.name);
            self.out.write_str(&format!("<h4>{name}</h4>"))?;
            for option in &group.options {
                let option = escape_html(option);
                self.out.write_str(&format!(
                    "<label><input type=\"radio\" name=\"{name}\" value=\"{option}\">{option}</label>"
                ))?;
            }
        }
        self.out.write_str("</form>")?;
        self.block_end(scope)
    }

    fn header(&mut self, header: &Header, scope: Scope) -> Result<()> {
        let level = header.hashes();
        self.out.write_str(&format!("<h{level}>"))?;
        self.write_nodes(&header.content, scope)?;
        self.out.write_str(&format!("</h{level}>"))?;
        self.block_end(scope)
    }

    fn youtube(&mut self, video: &YouTube, scope: Scope) -> Result<()> {
        self.out.write_str(&format!(
            "<iframe class=\"youtube-video\" src=\"https://www.youtube.com/embed/{}?rel=0\" \
             allow=\"accelerometer; autoplay; encrypted-media; gyroscope; picture-in-picture\" \
             allowfullscreen></iframe>",
            escape_html(&video.video_id)
        ))?;
        self.block_end(scope)
    }
}
