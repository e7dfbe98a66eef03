use parsedrill::construct::Parse;
use parsedrill::score::{normalize_missing, score};
use parsedrill::taxonomy::Field;

fn parse(fields: &[(Field, &str)]) -> Parse {
    let mut parse = Parse::new();
    for (field, value) in fields {
        parse.set(*field, *value);
    }
    parse
}

#[test]
fn the_dative_noun_example() {
    let gold = parse(&[(Field::Pos, "noun"), (Field::Case, "dat")]);
    let guess = parse(&[(Field::Pos, "noun"), (Field::Case, "gen")]);
    let result = score(Some(&gold), &guess);
    assert_eq!(result.correct, 1);
    assert_eq!(result.total, 2);
    assert_eq!(result.details.len(), 2);
    // details come out in canonical field order
    assert_eq!(result.details[0].field, Field::Pos);
    assert!(result.details[0].ok);
    assert_eq!(result.details[1].field, Field::Case);
    assert!(!result.details[1].ok);
    assert_eq!(result.details[1].gold.as_deref(), Some("dat"));
    assert_eq!(result.details[1].guess.as_deref(), Some("gen"));
    assert!(!result.is_fully_correct());
}

#[test]
fn scoring_ignores_case_and_surrounding_whitespace() {
    let gold = parse(&[(Field::Pos, "  NOUN "), (Field::Case, "Dat")]);
    let guess = parse(&[(Field::Pos, "noun"), (Field::Case, " dat  ")]);
    let result = score(Some(&gold), &guess);
    assert_eq!((result.correct, result.total), (2, 2));
    assert!(result.is_fully_correct());
}

#[test]
fn placeholder_spellings_mean_absent() {
    for placeholder in ["", "-", "—", "na", "none", " NA ", "None"] {
        assert_eq!(
            normalize_missing(Some(placeholder)),
            None,
            "{placeholder:?} should normalize to absent"
        );
    }
    assert_eq!(normalize_missing(Some(" Dat ")).as_deref(), Some("dat"));
    assert_eq!(normalize_missing(None), None);
}

#[test]
fn gold_placeholder_fields_are_not_scorable() {
    // a gold field holding a placeholder is the same as no gold field at all
    let gold = parse(&[(Field::Pos, "noun"), (Field::Case, "—"), (Field::Gender, "na")]);
    let guess = parse(&[(Field::Pos, "noun"), (Field::Case, "dat")]);
    let result = score(Some(&gold), &guess);
    assert_eq!((result.correct, result.total), (1, 1));
    assert_eq!(result.details.len(), 1);
    assert_eq!(result.details[0].field, Field::Pos);
}

#[test]
fn missing_guess_on_a_gold_field_counts_as_incorrect() {
    let gold = parse(&[(Field::Pos, "noun"), (Field::Case, "dat")]);
    let guess = parse(&[(Field::Pos, "noun")]);
    let result = score(Some(&gold), &guess);
    assert_eq!((result.correct, result.total), (1, 2));
    assert_eq!(result.details[1].guess, None);
    assert!(!result.details[1].ok);
    // a placeholder guess is no better than no guess
    let guess = parse(&[(Field::Pos, "noun"), (Field::Case, "—")]);
    let result = score(Some(&gold), &guess);
    assert_eq!((result.correct, result.total), (1, 2));
}

#[test]
fn gold_without_scorable_fields_is_never_fully_correct() {
    let guess = parse(&[(Field::Pos, "noun")]);
    for gold in [None, Some(parse(&[])), Some(parse(&[(Field::Pos, "—")]))] {
        let result = score(gold.as_ref(), &guess);
        assert_eq!(result.total, 0);
        assert_eq!(result.correct, 0);
        assert!(result.details.is_empty());
        assert!(
            !result.is_fully_correct(),
            "a word with no gold data must not be reported fully correct"
        );
    }
}

#[test]
fn extra_guess_fields_are_ignored() {
    let gold = parse(&[(Field::Pos, "prep")]);
    let guess = parse(&[(Field::Pos, "prep"), (Field::Case, "acc"), (Field::Number, "sg")]);
    let result = score(Some(&gold), &guess);
    assert_eq!((result.correct, result.total), (1, 1));
    assert!(result.is_fully_correct());
}

#[test]
fn verdicts_are_fresh_on_every_call() {
    let gold = parse(&[(Field::Pos, "noun")]);
    let guess = parse(&[(Field::Pos, "noun")]);
    let first = score(Some(&gold), &guess);
    let second = score(Some(&gold), &guess);
    assert_eq!(first, second);
}
