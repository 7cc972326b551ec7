//! Property tests over generated documents.

use proptest::prelude::*;

use labdown::nodes::{Code, Grid, GridCell, Header, ItemsList, Node, Text};
use labdown::{Dialect, RenderOptions, render_to_string};

fn dialect() -> impl Strategy<Value = Dialect> {
    prop_oneof![Just(Dialect::Markdown), Just(Dialect::Qwiklabs)]
}

proptest! {
    #[test]
    fn ordered_items_are_numbered_from_start(start in 1usize..100, count in 1usize..12) {
        let items = (0..count).map(|k| vec![Node::text(format!("item{k}"))]).collect();
        let list = ItemsList::ordered(start, items);
        let out = render_to_string(&RenderOptions::new(Dialect::Qwiklabs), &[list.into()]).unwrap();

        let lines: Vec<&str> = out.lines().collect();
        for k in 0..count {
            prop_assert_eq!(lines[k], format!("{}. item{k}", k + start));
        }
    }

    #[test]
    fn separator_matches_widest_row(widths in prop::collection::vec(1usize..7, 1..6), d in dialect()) {
        let rows: Vec<Vec<GridCell>> = widths
            .iter()
            .map(|&w| (0..w).map(|_| GridCell::new(vec![Node::text("c")])).collect())
            .collect();
        let out = render_to_string(&RenderOptions::new(d), &[Grid::new(rows).into()]).unwrap();

        let separator = out.lines().nth(2).unwrap();
        let widest = widths.iter().copied().max().unwrap();
        prop_assert_eq!(separator.matches(" --- |").count(), widest);
    }

    #[test]
    fn empty_code_emits_nothing(text in "[a-z]{1,8}", term in any::<bool>(), d in dialect()) {
        let options = RenderOptions::new(d);
        let code = Code { value: String::new(), lang: "sh".into(), term };
        let with_code = render_to_string(&options, &[Node::text(text.clone()), code.into()]).unwrap();
        let without = render_to_string(&options, &[Node::text(text)]).unwrap();
        prop_assert_eq!(with_code, without);
    }

    #[test]
    fn markers_wrap_trimmed_core(
        left in "[ \t]{0,3}",
        core in "[a-z]{1,10}",
        right in "[ \t]{0,3}",
        d in dialect(),
    ) {
        let text = Text::new(format!("{left}{core}{right}")).bold().code();
        let out = render_to_string(&RenderOptions::new(d), &[text.into()]).unwrap();

        let bold = d.config().bold;
        prop_assert_eq!(out, format!("{left}{}`{core}`{}{right}", bold.open, bold.close));
    }

    #[test]
    fn env_tags_gate_whole_subtrees(
        envs in prop::collection::vec("[a-c]{1,2}", 0..4),
        active in "[a-c]{1,2}",
    ) {
        let header = Node::from(Header::new(0, vec![Node::text("hidden")])).with_envs(envs.clone());
        let options = RenderOptions::default().with_env(active.clone());
        let out = render_to_string(&options, &[header]).unwrap();

        let visible = envs.is_empty() || envs.contains(&active);
        prop_assert_eq!(out.is_empty(), !visible);
    }
}
