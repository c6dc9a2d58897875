use quarry_core::store::{save_index, save_lengths, IndexPaths};
use quarry_core::{build_index, rank, RankOptions};
use quarry_search::{print_results, Searcher};
use tempfile::tempdir;

fn build_on_disk(dir: &std::path::Path) {
    let (index, lengths) = build_index(vec![
        ("doc1".to_string(), "the cat sat".to_string()),
        ("doc2".to_string(), "the dog sat".to_string()),
    ]);
    let paths = IndexPaths::new(dir);
    save_index(&paths, &index).unwrap();
    save_lengths(&paths, &lengths).unwrap();
}

#[test]
fn searcher_answers_boolean_and_ranked_queries() {
    let dir = tempdir().unwrap();
    build_on_disk(dir.path());
    let searcher = Searcher::open(dir.path(), RankOptions::default()).unwrap();

    let cat = searcher.search("cat");
    assert_eq!(cat.len(), 1);
    assert_eq!(cat[0].doc, "doc1");
    assert!(cat[0].score > 0.0);

    let sat = searcher.search("sat");
    assert_eq!(sat.len(), 2);
    assert_eq!(sat[0].doc, "doc1");
    assert_eq!(sat[1].doc, "doc2");

    assert!(searcher.search("cat AND dog").is_empty());
    assert_eq!(searcher.search("cat or dog").len(), 2);
}

#[test]
fn disk_round_trip_matches_in_memory_ranking() {
    let (index, lengths) = build_index(vec![
        ("a.txt".to_string(), "whales swim in deep oceans".to_string()),
        ("b.txt".to_string(), "rivers run to the oceans".to_string()),
        ("c.txt".to_string(), "whales sing across oceans".to_string()),
    ]);
    let dir = tempdir().unwrap();
    let paths = IndexPaths::new(dir.path());
    save_index(&paths, &index).unwrap();
    save_lengths(&paths, &lengths).unwrap();

    let searcher = Searcher::open(dir.path(), RankOptions::default()).unwrap();
    for query in ["whales", "whales OR rivers", "swim and whales", "oceans"] {
        let in_memory = rank(query, &index, &lengths);
        let from_disk = searcher.search(query);
        assert_eq!(in_memory.len(), from_disk.len(), "query {query:?}");
        for (m, d) in in_memory.iter().zip(&from_disk) {
            assert_eq!(m.doc, d.doc, "query {query:?}");
            assert!((m.score - d.score).abs() < 1e-9, "query {query:?}");
        }
    }
}

#[test]
fn open_fails_without_index_files() {
    let dir = tempdir().unwrap();
    assert!(Searcher::open(dir.path(), RankOptions::default()).is_err());
}

#[test]
fn rendered_output_matches_the_loop_format() {
    let dir = tempdir().unwrap();
    build_on_disk(dir.path());
    let searcher = Searcher::open(dir.path(), RankOptions::default()).unwrap();

    let mut out = Vec::new();
    print_results(&mut out, &searcher.search("cat")).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "Documents found:\n- doc1 (Score: 1.0000)\n");

    let mut out = Vec::new();
    print_results(&mut out, &searcher.search("platypus")).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "No matching documents.\n");
}
