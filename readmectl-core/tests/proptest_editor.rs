use proptest::prelude::*;
use readmectl_core::{EditorOp, SectionEditor, SectionTemplate, TemplateCatalog};

const SLUGS: &[&str] = &["alpha", "beta", "gamma", "delta", "epsilon", "zeta"];

fn test_catalog() -> TemplateCatalog {
    let mut catalog = TemplateCatalog::empty();
    for slug in SLUGS {
        catalog.upsert(SectionTemplate::new(
            *slug,
            slug.to_uppercase(),
            format!("## {slug}\n"),
        ));
    }
    catalog
}

// Strategy to generate arbitrary editor operations over the fixed slugs
fn arb_op() -> impl Strategy<Value = EditorOp> {
    prop_oneof![
        (0..SLUGS.len()).prop_map(|i| EditorOp::Add { slug: SLUGS[i].to_string() }),
        (0..SLUGS.len()).prop_map(|i| EditorOp::Remove { slug: SLUGS[i].to_string() }),
        ((0..SLUGS.len()), (0..SLUGS.len())).prop_map(|(i, j)| EditorOp::Reorder {
            from: SLUGS[i].to_string(),
            to: SLUGS[j].to_string(),
        }),
        (0..SLUGS.len()).prop_map(|i| EditorOp::Focus { slug: SLUGS[i].to_string() }),
        Just(EditorOp::AddCustom),
    ]
}

proptest! {
    /// Property: any op sequence keeps each slug in exactly one list
    #[test]
    fn prop_ops_preserve_partition(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut catalog = test_catalog();
        let mut editor = SectionEditor::from_parts(
            SLUGS.iter().map(|s| s.to_string()).collect(),
            Vec::new(),
            None,
        );

        for op in ops {
            editor.apply(op, &mut catalog);

            let mut all: Vec<String> = editor
                .available()
                .iter()
                .chain(editor.selected().iter())
                .cloned()
                .collect();
            all.sort_unstable();
            let before = all.len();
            all.dedup();
            prop_assert_eq!(before, all.len());

            let mut expect: Vec<String> =
                catalog.slugs().map(str::to_string).collect();
            expect.sort_unstable();
            prop_assert_eq!(all, expect);

            if let Some(focused) = editor.focused() {
                prop_assert!(editor.is_selected(focused));
            }
        }
    }

    /// Property: reorder is a permutation that lands the source on the
    /// destination's index
    #[test]
    fn prop_reorder_is_a_stable_move(n in 2usize..6, from in 0usize..6, to in 0usize..6) {
        prop_assume!(from < n && to < n);

        let mut catalog = test_catalog();
        let selected: Vec<String> = SLUGS[..n].iter().map(|s| s.to_string()).collect();
        let mut editor = SectionEditor::from_parts(
            SLUGS[n..].iter().map(|s| s.to_string()).collect(),
            selected.clone(),
            None,
        );

        let changed = editor.apply(
            EditorOp::Reorder {
                from: SLUGS[from].to_string(),
                to: SLUGS[to].to_string(),
            },
            &mut catalog,
        );

        prop_assert_eq!(changed, from != to);
        prop_assert_eq!(editor.selected().len(), n);

        let mut sorted_after: Vec<&String> = editor.selected().iter().collect();
        sorted_after.sort_unstable();
        let mut sorted_before: Vec<&String> = selected.iter().collect();
        sorted_before.sort_unstable();
        prop_assert_eq!(sorted_after, sorted_before);

        prop_assert_eq!(editor.selected()[to].as_str(), SLUGS[from]);
    }

    /// Property: display sorting never reorders the stored available list
    #[test]
    fn prop_display_sort_leaves_state_alone(ops in prop::collection::vec(arb_op(), 0..20)) {
        let mut catalog = test_catalog();
        let mut editor = SectionEditor::from_parts(
            SLUGS.iter().map(|s| s.to_string()).collect(),
            Vec::new(),
            None,
        );
        for op in ops {
            editor.apply(op, &mut catalog);
        }

        let stored_before = editor.available().to_vec();
        let display = editor.alphabetized_available(&catalog);
        prop_assert_eq!(editor.available(), stored_before.as_slice());

        // Same multiset, sorted by display name with slug tie-break
        let mut resorted = display.clone();
        resorted.sort_by(|a, b| {
            catalog
                .display_name(a)
                .cmp(catalog.display_name(b))
                .then_with(|| a.cmp(b))
        });
        prop_assert_eq!(display, resorted);
    }

    /// Property: add then remove of the same slug restores the selected
    /// list (the slug itself re-enters available at the tail)
    #[test]
    fn prop_add_remove_restores_selection(i in 0..SLUGS.len()) {
        let mut catalog = test_catalog();
        let mut editor = SectionEditor::from_parts(
            SLUGS.iter().map(|s| s.to_string()).collect(),
            Vec::new(),
            None,
        );
        editor.apply(EditorOp::Add { slug: "alpha".into() }, &mut catalog);
        let selected_before = editor.selected().to_vec();

        let slug = SLUGS[i].to_string();
        if editor.is_available(&slug) {
            editor.apply(EditorOp::Add { slug: slug.clone() }, &mut catalog);
            editor.apply(EditorOp::Remove { slug: slug.clone() }, &mut catalog);
            prop_assert_eq!(editor.selected(), selected_before.as_slice());
            prop_assert_eq!(editor.available().last().map(String::as_str), Some(slug.as_str()));
        }
    }
}

#[test]
fn test_noop_ops_leave_everything_untouched() {
    let mut catalog = test_catalog();
    let mut editor = SectionEditor::from_parts(
        vec!["gamma".into(), "delta".into(), "epsilon".into(), "zeta".into()],
        vec!["alpha".into(), "beta".into()],
        None,
    );
    editor.focus("alpha");

    let noops = [
        EditorOp::Add { slug: "alpha".into() },
        EditorOp::Add { slug: "missing".into() },
        EditorOp::Remove { slug: "gamma".into() },
        EditorOp::Remove { slug: "missing".into() },
        EditorOp::Reorder { from: "alpha".into(), to: "alpha".into() },
        EditorOp::Reorder { from: "alpha".into(), to: "gamma".into() },
        EditorOp::Focus { slug: "gamma".into() },
        EditorOp::Focus { slug: "alpha".into() },
    ];

    for op in noops {
        assert!(!editor.apply(op.clone(), &mut catalog), "{op:?} should be a no-op");
        assert_eq!(editor.selected(), ["alpha", "beta"]);
        assert_eq!(
            editor.available(),
            ["gamma", "delta", "epsilon", "zeta"]
        );
        assert_eq!(editor.focused(), Some("alpha"));
    }
}
