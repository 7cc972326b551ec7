//! HTML fragment rendering.

use labdown::html;
use labdown::nodes::{Code, Grid, GridCell, Header, ItemsList, List, Node, Survey, SurveyGroup, Text};
use labdown::{Dialect, RenderOptions, render_to_string};

fn block(nodes: &[Node]) -> String {
    let mut out = Vec::new();
    html::render(&mut out, &RenderOptions::default(), nodes).unwrap();
    String::from_utf8(out).unwrap()
}

fn inline(nodes: &[Node]) -> String {
    let mut out = Vec::new();
    html::render_inline(&mut out, &RenderOptions::default(), nodes).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_block_fragment() {
    let doc = vec![
        Header::new(1, vec![Node::text("Intro")]).into(),
        List {
            nodes: vec![Node::text("Read "), Text::new("this").bold().into()],
        }
        .into(),
        Code::source("x := 1", "go").into(),
    ];
    assert_eq!(
        block(&doc),
        "<h2>Intro</h2>\n<p>Read <strong>this</strong></p>\n\
         <pre><code class=\"language-go\">x := 1</code></pre>\n"
    );
}

#[test]
fn test_inline_fragment_has_no_newlines() {
    let doc = vec![
        ItemsList::ordered(2, vec![vec![Node::text("a\nb")]]).into(),
        Code::terminal("ls\ncd /tmp").into(),
        Survey {
            id: "poll".into(),
            groups: vec![SurveyGroup::new("Pick", ["x", "y"])],
        }
        .into(),
    ];
    let out = inline(&doc);
    assert!(!out.contains('\n'));
    assert!(out.starts_with("<ol start=\"2\"><li>a<br>b</li></ol>"));
    assert!(out.contains("ls<br>cd /tmp"));
    assert_eq!(out.matches("type=\"radio\"").count(), 2);
}

#[test]
fn test_template_braces_are_neutralized() {
    assert_eq!(
        inline(&[Node::text("{{project_id}}")]),
        "&#123;&#123;project_id&#125;&#125;"
    );
}

#[test]
fn test_table_cell_with_code_uses_html_in_both_dialects() {
    let grid = Grid::new(vec![
        vec![GridCell::new(vec![Node::text("Command")])],
        vec![GridCell::new(vec![Code::terminal("gsutil ls").into()])],
    ]);
    let doc = vec![Node::from(grid)];
    for dialect in Dialect::ALL {
        let out = render_to_string(&RenderOptions::new(dialect), &doc).unwrap();
        assert_eq!(
            out,
            "\n| Command |\n| --- |\n| <pre><code class=\"console\">gsutil ls</code></pre> |\n"
        );
    }
}
