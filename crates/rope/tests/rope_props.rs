use proptest::prelude::*;

use split_forest_rope::{Rope, ShiftList};

#[derive(Clone, Debug)]
enum Edit {
    Insert { at: usize, items: Vec<u8> },
    Delete { at: usize, span: usize },
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (0usize..64, proptest::collection::vec(any::<u8>(), 0..8))
            .prop_map(|(at, items)| Edit::Insert { at, items }),
        (0usize..64, 0usize..8).prop_map(|(at, span)| Edit::Delete { at, span }),
    ]
}

proptest! {
    #[test]
    fn rope_tracks_a_vec_model(edits in proptest::collection::vec(edit_strategy(), 1..120)) {
        let mut rope: Rope<u8> = Rope::with_seed(7);
        let mut model: Vec<u8> = Vec::new();
        for edit in edits {
            match edit {
                Edit::Insert { at, items } => {
                    // clamp the *intent* onto a valid position; the rope
                    // itself must agree with the model on validity
                    let ok = rope.insert_at(at, items.iter().copied());
                    if at <= model.len() {
                        prop_assert!(ok.is_ok());
                        model.splice(at..at, items);
                    } else {
                        prop_assert!(ok.is_err());
                    }
                }
                Edit::Delete { at, span } => {
                    let ok = rope.delete_range(at, span);
                    if at + span <= model.len() {
                        prop_assert!(ok.is_ok());
                        model.drain(at..at + span);
                    } else {
                        prop_assert!(ok.is_err());
                    }
                }
            }
            prop_assert_eq!(rope.len(), model.len());
        }
        prop_assert_eq!(rope.to_vec(), model.clone());
        if !model.is_empty() {
            let mid = model.len() / 2;
            prop_assert_eq!(rope.read_range(mid, model.len() - mid).unwrap(), model[mid..].to_vec());
            prop_assert_eq!(rope.get(mid), Ok(&model[mid]));
        }
    }

    #[test]
    fn shift_list_tracks_a_vec_model(
        init in proptest::collection::vec(-100i64..100, 1..40),
        updates in proptest::collection::vec((0usize..40, 0usize..40, -50i64..50), 0..40),
    ) {
        let mut list: ShiftList = init.iter().copied().collect();
        let mut model = init;
        for (at, span, delta) in updates {
            let ok = list.range_add(at, span, delta);
            if at + span <= model.len() {
                prop_assert!(ok.is_ok());
                for value in &mut model[at..at + span] {
                    *value += delta;
                }
            } else {
                prop_assert!(ok.is_err());
            }
        }
        prop_assert_eq!(list.to_vec(), model.clone());
        for (at, expected) in model.iter().enumerate() {
            prop_assert_eq!(list.get(at), Ok(*expected));
        }
    }
}
