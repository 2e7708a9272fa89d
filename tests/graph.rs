use parsnip::prelude::*;

#[test]
fn children_list_the_direct_substructure() {
    let a = char('a');
    let b = char('b');
    let word = a.seq(&b);

    let children = word.children();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0], a);
    assert_eq!(children[1], b);
    assert!(char('a').star().children()[0].is_equal_to(&char('a')));
}

#[test]
fn all_parsers_walks_depth_first_in_child_order() {
    let a = char('a');
    let b = char('b');
    let word = a.seq(&b);
    let root = word.star();

    let parsers = root.all_parsers();
    assert_eq!(parsers, vec![root.clone(), word, a, b]);
}

#[test]
fn all_parsers_visits_shared_nodes_once() {
    let a = char('a');
    let twice = a.seq(&a);

    assert_eq!(twice.all_parsers().len(), 2);
}

#[test]
fn all_parsers_terminates_on_cycles() {
    let expr = recursive(|inner| char('(').seq(&inner).seq(&char(')')).or(&digit()));

    let parsers = expr.all_parsers();
    assert_eq!(parsers[0], expr);
    // The delegate is reachable from inside its own definition.
    assert!(parsers.len() > 1);
    let again = expr.all_parsers();
    assert_eq!(parsers, again);
}

#[test]
fn replace_rewrites_every_identical_slot() {
    let a = char('a');
    let twice = a.seq(&a);
    let b = char('b');

    twice.replace(&a, &b);
    assert!(twice.accept("bb"));
    assert!(!twice.accept("aa"));
}

#[test]
fn replace_ignores_structurally_equal_strangers() {
    let word = char('a').seq(&char('a'));
    let stranger = char('a');

    word.replace(&stranger, &char('b'));
    assert!(word.accept("aa"));
}

#[test]
fn replace_all_is_idempotent() {
    let old = char('x');
    let new = char('y');
    let root = old.seq(&old.star()).seq(&letter());

    root.replace_all(&old, &new);
    assert!(root.accept("yyz"));

    let snapshot = root.deep_copy();
    root.replace_all(&old, &new);
    assert!(root.is_equal_to(&snapshot));
}

#[test]
fn copy_is_shallow_and_shares_children() {
    let inner = char('a');
    let original = inner.plus();
    let copy = original.copy();

    assert_ne!(copy, original);
    assert!(copy.is_equal_to(&original));
    assert_eq!(copy.children()[0], original.children()[0]);

    // Rewriting the original leaves the copy watching the old child.
    original.replace(&inner, &char('b'));
    assert!(original.accept("b"));
    assert!(!original.accept("a"));
    assert!(copy.accept("a"));
    assert!(!copy.accept("b"));
}

#[test]
fn deep_copy_is_isomorphic_and_disjoint() {
    let expr = recursive(|inner| {
        char('(').seq(&inner.optional()).seq(&char(')')).flatten()
    });
    let copy = expr.deep_copy();

    assert!(copy.is_equal_to(&expr));
    assert!(expr.is_equal_to(&copy));
    for original in expr.all_parsers() {
        for copied in copy.all_parsers() {
            assert_ne!(original, copied);
        }
    }
    assert!(copy.end().accept("((()))"));
    assert!(!copy.end().accept("(()"));
}

#[test]
fn transform_substitutes_mapped_nodes() {
    let root = char('a').seq(&char('b'));
    let rewritten = root.transform(|copy| {
        if copy.is_equal_to(&char('a')) {
            char('x')
        } else {
            copy
        }
    });

    assert!(rewritten.accept("xb"));
    assert!(!rewritten.accept("ab"));
    // The original graph is untouched.
    assert!(root.accept("ab"));
}

#[test]
fn structural_equality_is_cycle_safe() {
    let make = || recursive(|inner| char('(').seq(&inner.optional()).seq(&char(')')));
    let one = make();
    let two = make();

    assert!(one.is_equal_to(&two));
    assert!(one.is_equal_to(&one));

    let different = recursive(|inner| char('[').seq(&inner.optional()).seq(&char(']')));
    assert!(!one.is_equal_to(&different));
}

#[test]
fn structural_equality_compares_configuration() {
    assert!(char('a').is_equal_to(&char('a')));
    assert!(!char('a').is_equal_to(&char('b')));
    assert!(!digit().repeat(1, 2).is_equal_to(&digit().repeat(1, 3)));
    assert!(!digit().not("one").is_equal_to(&digit().not("two")));
    assert!(digit().optional().is_equal_to(&digit().optional()));
}

#[test]
fn distinct_actions_are_never_structurally_equal() {
    let first = digit().map(|value| value);
    let second = digit().map(|value| value);

    assert!(!first.is_equal_to(&second));
    assert!(first.is_equal_to(&first.copy()));
}
