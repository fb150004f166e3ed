//! End-to-end tests over the vocabularies and mapping shipped in `data/`

use std::path::PathBuf;

use blocklingo::{Vocabularies, load_all_vocabularies_from_dir};

use crate::direction::Direction;
use crate::error::TranslateError;
use crate::mapping::MappingTable;
use crate::pattern::substitute_text;
use crate::pipeline::Pipeline;
use crate::translator::Strategy;

const SCRIPT_EN: &str = "when @greenFlag clicked
go to [random position v]
say [Hello!] for (2) secs
point in direction (90)
forever
  if <touching [edge v]?> then
    turn @turnRight (15) degrees
  end
end";

const SCRIPT_JA: &str = "@greenFlag が押されたとき
[どこかの場所 v] へ行く
[Hello!] と (2) 秒言う
(90) 度に向ける
ずっと
  もし <[端 v] に触れた> なら
    @turnRight (15) 度回す
  end
end";

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../data")
}

fn load() -> (Vocabularies, MappingTable) {
    let vocabularies = load_all_vocabularies_from_dir(&data_dir().join("locales")).unwrap();
    let table = MappingTable::from_file(
        &data_dir().join("dropdown_map.json"),
        &"en-to-ja".parse().unwrap(),
    )
    .unwrap();
    (vocabularies, table)
}

fn translate(source: &str, direction: &str, strategy: Strategy) -> String {
    let (vocabularies, table) = load();
    let translator = strategy.translator();
    let pipeline = Pipeline::new(&vocabularies, &table, translator.as_ref());
    let direction: Direction = direction.parse().unwrap();
    pipeline.translate(source, &direction).unwrap()
}

#[test]
fn test_shipped_data_loads() {
    let (vocabularies, table) = load();
    assert!(vocabularies.available("ja").is_some());
    assert!(!table.forward().is_empty());
    assert_eq!(table.forward().len(), table.inverse().len());
}

#[test]
fn test_script_en_to_ja() {
    assert_eq!(translate(SCRIPT_EN, "en-to-ja", Strategy::Tree), SCRIPT_JA);
}

#[test]
fn test_script_ja_to_en() {
    assert_eq!(translate(SCRIPT_JA, "ja-to-en", Strategy::Tree), SCRIPT_EN);
}

#[test]
fn test_round_trip_through_japanese() {
    let source = "go to [mouse-pointer v]\nset rotation style [left-right v]\nswitch costume to [costume2 v]";
    let japanese = translate(source, "en-to-ja", Strategy::Tree);
    assert_ne!(japanese, source);
    assert_eq!(translate(&japanese, "ja-to-en", Strategy::Tree), source);
}

#[test]
fn test_strategies_agree_on_dropdown_only_script() {
    let source = "go to [random position v]\nif <touching [edge v]?> then\nend";
    assert_eq!(
        translate(source, "en-to-ja", Strategy::Tree),
        translate(source, "en-to-ja", Strategy::Pattern)
    );
}

#[test]
fn test_numeric_slot_kept_by_both_strategies() {
    for strategy in [Strategy::Tree, Strategy::Pattern] {
        assert_eq!(
            translate("point in direction (90)", "en-to-en", strategy),
            "point in direction (90)"
        );
    }
}

#[test]
fn test_free_text_matching_a_key_is_kept_by_tree() {
    let output = translate("say [edge] for (2) secs", "en-to-ja", Strategy::Tree);
    assert_eq!(output, "[edge] と (2) 秒言う");
}

#[test]
fn test_pattern_rewrites_free_text_matching_a_key() {
    // Text-level substitution cannot see slot types
    let output = translate("say [edge] for (2) secs", "en-to-ja", Strategy::Pattern);
    assert_eq!(output, "[端] と (2) 秒言う");
}

#[test]
fn test_dropdown_substitution_is_idempotent() {
    let (_, table) = load();
    let once = substitute_text(SCRIPT_JA, table.inverse());
    assert_eq!(substitute_text(&once, table.inverse()), once);
}

#[test]
fn test_unknown_target_returns_input() {
    let (vocabularies, table) = load();
    let translator = Strategy::Tree.translator();
    let pipeline = Pipeline::new(&vocabularies, &table, translator.as_ref());

    let failure = pipeline
        .translate(SCRIPT_EN, &"en-to-de".parse().unwrap())
        .unwrap_err();
    assert!(matches!(failure.error, TranslateError::VocabularyUnavailable(_)));
    assert_eq!(failure.fallback, SCRIPT_EN);
}
