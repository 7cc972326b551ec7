//! End-to-end rendering through the public API.

use std::io::{Read, Seek, SeekFrom};

use labdown::nodes::{Code, Grid, GridCell, Infobox, InfoboxKind, ItemsList, List, Node, Text};
use labdown::{Dialect, Error, RenderOptions, render, render_to_string};

fn render_both(nodes: &[Node]) -> (String, String) {
    let md = render_to_string(&RenderOptions::new(Dialect::Markdown), nodes).unwrap();
    let qwiklabs = render_to_string(&RenderOptions::new(Dialect::Qwiklabs), nodes).unwrap();
    (md, qwiklabs)
}

#[test]
fn test_bold_text_is_wrapped_in_matching_markers() {
    let (md, qwiklabs) = render_both(&[Text::new("hello").bold().into()]);
    assert_eq!(md, "<strong>hello</strong>");
    assert_eq!(qwiklabs, "**hello**");
}

#[test]
fn test_ordered_list_starts_at_offset() {
    let list = ItemsList::ordered(3, vec![vec![Node::text("a")], vec![Node::text("b")]]);
    let (md, qwiklabs) = render_both(&[list.into()]);
    for out in [md, qwiklabs] {
        let lines: Vec<&str> = out.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(lines, ["3. a", "4. b"]);
    }
}

#[test]
fn test_grid_pads_only_the_header_row() {
    let cell = |s: &str| GridCell::new(vec![Node::text(s)]);
    let grid = Grid::new(vec![vec![cell("A"), cell("B")], vec![cell("1")]]);
    let (md, qwiklabs) = render_both(&[grid.into()]);
    assert_eq!(md, "\n| A | B |\n| --- | --- |\n| 1 |\n");
    assert_eq!(md, qwiklabs);
}

#[test]
fn test_terminal_code_gets_console_block() {
    let (md, qwiklabs) = render_both(&[Code::terminal("ls -la").into()]);
    for out in [md, qwiklabs] {
        assert!(out.contains("<ql-code-block bash templated noWrap>\nls -la\n</ql-code-block>"));
    }
}

#[test]
fn test_negative_infobox_never_uses_positive_tags() {
    let infobox = Infobox::new(InfoboxKind::Negative, vec![Node::text("careful")]);
    let (md, qwiklabs) = render_both(&[infobox.into()]);
    for out in [md, qwiklabs] {
        assert!(out.starts_with("<ql-warningbox>"));
        assert!(out.contains("careful"));
        assert!(out.trim_end().ends_with("</ql-warningbox>"));
        assert!(!out.contains("ql-infobox"));
    }
}

#[test]
fn test_env_mismatch_drops_node_and_descendants() {
    let para = List {
        nodes: vec![Node::text("web text"), Code::terminal("echo web").into()],
    };
    let doc = vec![Node::from(para).with_envs(["web"])];
    let options = RenderOptions::new(Dialect::Qwiklabs).with_env("print");
    let mut out = Vec::new();
    render(&mut out, &options, &doc).unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_untagged_nodes_render_in_every_env() {
    let doc = vec![Node::text("everywhere")];
    for env in ["web", "print", ""] {
        let options = RenderOptions::default().with_env(env);
        assert_eq!(render_to_string(&options, &doc).unwrap(), "everywhere");
    }
}

#[test]
fn test_render_into_file() {
    let mut file = tempfile::tempfile().unwrap();
    let doc = vec![
        Node::text("Run:"),
        Code::terminal("gcloud auth list").into(),
    ];
    render(&mut file, &RenderOptions::default(), &doc).unwrap();

    file.seek(SeekFrom::Start(0)).unwrap();
    let mut written = String::new();
    file.read_to_string(&mut written).unwrap();
    assert_eq!(
        written,
        "Run:\n\n\n<ql-code-block bash templated noWrap>\ngcloud auth list\n</ql-code-block>\n\n"
    );
}

#[test]
fn test_same_tree_renders_identically_across_threads() {
    let doc = vec![
        Node::text("Shared"),
        ItemsList::ordered(1, vec![vec![Node::text("one")], vec![Node::text("two")]]).into(),
    ];
    let expected = render_to_string(&RenderOptions::default(), &doc).unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| render_to_string(&RenderOptions::default(), &doc).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_deep_nesting_is_rejected() {
    let mut node = Node::text("bottom");
    for _ in 0..40 {
        node = List { nodes: vec![node] }.into();
    }
    let options = RenderOptions::default().with_max_depth(16);
    assert!(matches!(
        render_to_string(&options, &[node]),
        Err(Error::TooDeep { limit: 16 })
    ));
}
