use std::io::Cursor;

use lazy_static::lazy_static;
use udtree::graph::{DepTree, HeadMap};
use udtree_conllu::io::{ReadSentence, Reader};

use crate::{has_crossing, Binarizer, LiftProjectivizer, ObliquenessTable, Projectivize, SexpEmitter};

pub fn read_sentences(data: &str) -> Vec<DepTree> {
    Reader::new(Cursor::new(data))
        .sentences()
        .map(|s| s.unwrap())
        .collect()
}

lazy_static! {
    static ref TABLE: ObliquenessTable = ObliquenessTable::ud2();
}

static PROJECTIVE: &str = "# sent_id = test-1
# text = A B C
1\tA\t_\tNOUN\t_\t_\t2\tnsubj\t_\t_
2\tB\t_\tVERB\t_\t_\t0\troot\t_\t_
3\tC\t_\tNOUN\t_\t_\t2\tobj\t_\t_
";

static NONPROJECTIVE: &str = "# sent_id = test-2
# text = A hearing is scheduled on the issue today .
1\tA\t_\tDET\t_\t_\t2\tdet\t_\t_
2\thearing\t_\tNOUN\t_\t_\t4\tnsubj:pass\t_\t_
3\tis\t_\tAUX\t_\t_\t4\taux:pass\t_\t_
4\tscheduled\t_\tVERB\t_\t_\t0\troot\t_\t_
5\ton\t_\tADP\t_\t_\t7\tcase\t_\t_
6\tthe\t_\tDET\t_\t_\t7\tdet\t_\t_
7\tissue\t_\tNOUN\t_\t_\t2\tnmod\t_\t_
8\ttoday\t_\tNOUN\t_\t_\t4\tadvmod\t_\t_
9\t.\t_\tPUNCT\t_\t_\t4\tpunct\t_\t_
";

#[test]
fn projective_sentence_pipeline() {
    let tree = read_sentences(PROJECTIVE).remove(0);
    assert!(!has_crossing(&tree));
    assert_eq!(tree.metadata().sent_id(), Some("test-1"));

    let heads = HeadMap::from_tree(&tree).unwrap();
    let btree = Binarizer::new(&TABLE).binarize(&tree).unwrap();
    let sexp = SexpEmitter::new().emit(&tree, &btree, &heads);

    assert_eq!(sexp, "(nsubj (NOUN A)(obj-H (VERB-H B)(NOUN C)))");
}

#[test]
fn nonprojective_sentence_pipeline() {
    let mut tree = read_sentences(NONPROJECTIVE).remove(0);
    assert!(has_crossing(&tree));

    // Head assignment is frozen before lifting.
    let heads = HeadMap::from_tree(&tree).unwrap();

    LiftProjectivizer::new().projectivize(&mut tree).unwrap();
    assert!(!has_crossing(&tree));

    // The crossing arc 2 -> 7 was lifted to the root.
    assert_eq!(tree.relation(7), Some("nmod*"));
    assert_eq!(tree.head(7).unwrap().head(), 4);
    assert_eq!(heads.head_of(7), 2);

    let btree = Binarizer::new(&TABLE).binarize(&tree).unwrap();
    let sexp = SexpEmitter::new().emit(&tree, &btree, &heads);

    // Nine leaves make eight splits, each marking exactly one head.
    assert_eq!(sexp.matches("-H").count(), 8);
    // Lift markers do not surface in the output.
    assert!(!sexp.contains('*'));
    assert!(sexp.contains("(NOUN hearing)"));
}

#[test]
fn degraded_mode_still_binarizes() {
    // Without projectivization, crossing arcs pass through and the
    // sentence still renders, with undefined adjacency quality.
    let tree = read_sentences(NONPROJECTIVE).remove(0);
    let heads = HeadMap::from_tree(&tree).unwrap();

    let btree = Binarizer::new(&TABLE).binarize(&tree).unwrap();
    let sexp = SexpEmitter::new().emit(&tree, &btree, &heads);

    assert_eq!(btree.leaf_indices(btree.root()).len(), 9);
    assert_eq!(sexp.matches("-H").count(), 8);
}

#[test]
fn binary_leaves_match_token_set() {
    for data in &[PROJECTIVE, NONPROJECTIVE] {
        let tree = read_sentences(data).remove(0);
        let btree = Binarizer::new(&TABLE).binarize(&tree).unwrap();

        let leaves: Vec<usize> = btree.leaf_indices(btree.root()).into_iter().collect();
        let tokens: Vec<usize> = (1..tree.len()).collect();
        assert_eq!(leaves, tokens);
    }
}
