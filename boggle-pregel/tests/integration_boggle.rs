//! End-to-end word search runs over small boards

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::Write;
use std::sync::{Arc, Mutex};

use boggle_pregel::{
    find_words, load_graph, parse_adjacency, Board, BoardFormat, BoggleComputation,
    ComputeContext, ComputeResult, Dictionary, FoundWords, Graph, PathMessage, PregelConfig,
    PregelError, PregelRuntime, Termination, VertexId, VertexProgram,
};

fn dictionary(words: &[&str]) -> Arc<Dictionary> {
    Arc::new(Dictionary::from_words(words.iter().copied()))
}

fn grid(rows: &[&str]) -> Graph<FoundWords> {
    Board::from_rows(rows).unwrap().to_graph()
}

fn sorted_values(values: BTreeMap<VertexId, FoundWords>) -> BTreeMap<String, FoundWords> {
    values
        .into_iter()
        .map(|(id, mut words)| {
            words.sort();
            (id.0, words)
        })
        .collect()
}

fn words_at(values: &BTreeMap<VertexId, FoundWords>, id: &str) -> FoundWords {
    values.get(&VertexId::new(id)).cloned().unwrap_or_default()
}

#[tokio::test]
async fn test_word_lands_on_final_cell() {
    let result = find_words(
        grid(&["CAT", "XYZ", "QRS"]),
        dictionary(&["cat"]),
        PregelConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(result.termination, Termination::Natural);
    let values = result.into_values();
    assert_eq!(words_at(&values, "T_0_2"), vec!["cat"]);
    for (id, words) in &values {
        if id.as_str() != "T_0_2" {
            assert!(words.is_empty(), "{} unexpectedly found {:?}", id, words);
        }
    }
}

#[tokio::test]
async fn test_unmatched_board_leaves_every_value_empty() {
    let result = find_words(
        grid(&["XXX", "YYY", "ZZZ"]),
        Arc::new(Dictionary::builtin()),
        PregelConfig::default(),
    )
    .await
    .unwrap();

    assert!(result.is_natural());
    assert_eq!(result.graph.len(), 9);
    assert!(result.into_values().values().all(Vec::is_empty));
}

#[tokio::test]
async fn test_two_vertex_exchange() {
    let graph = parse_adjacency("A B\nB A\n").unwrap();
    let result = find_words(graph, dictionary(&["ab"]), PregelConfig::default())
        .await
        .unwrap();

    // Round 0 seeds, round 1 classifies, then nothing is left
    assert_eq!(result.supersteps, 2);
    assert!(result.is_natural());

    let values = result.into_values();
    assert!(words_at(&values, "A").is_empty());
    assert_eq!(words_at(&values, "B"), vec!["ab"]);
}

#[tokio::test]
async fn test_single_letter_word_recorded_on_its_cell() {
    let graph = parse_adjacency("A B\nB\n").unwrap();
    let result = find_words(graph, dictionary(&["a", "ab"]), PregelConfig::default())
        .await
        .unwrap();

    let values = result.into_values();
    assert_eq!(words_at(&values, "A"), vec!["a"]);
    assert_eq!(words_at(&values, "B"), vec!["ab"]);
}

#[tokio::test]
async fn test_exact_match_is_not_extended() {
    let graph = parse_adjacency("A B\nB C\nC\n").unwrap();
    let result = find_words(graph, dictionary(&["ab", "abc"]), PregelConfig::default())
        .await
        .unwrap();

    let values = result.into_values();
    assert_eq!(words_at(&values, "B"), vec!["ab"]);
    assert!(words_at(&values, "C").is_empty());
}

#[tokio::test]
async fn test_distinct_paths_to_same_word_are_all_kept() {
    // In a 2x2 board every cell touches every other cell
    let result = find_words(grid(&["AB", "BA"]), dictionary(&["ab"]), PregelConfig::default())
        .await
        .unwrap();

    let values = result.into_values();
    assert_eq!(words_at(&values, "B_0_1"), vec!["ab", "ab"]);
    assert_eq!(words_at(&values, "B_1_0"), vec!["ab", "ab"]);
    assert!(words_at(&values, "A_0_0").is_empty());
}

#[tokio::test]
async fn test_longer_words_on_4x4_board() {
    let board = ["GEEK", "XXSX", "QUIZ", "XXXX"];
    let result = find_words(
        grid(&board),
        Arc::new(Dictionary::builtin()),
        PregelConfig::default(),
    )
    .await
    .unwrap();

    assert!(result.is_natural());
    let values = result.into_values();
    assert_eq!(words_at(&values, "S_1_2"), vec!["geeks"]);
    assert_eq!(words_at(&values, "Z_2_3"), vec!["quiz"]);
}

#[tokio::test]
async fn test_runs_agree_as_value_sets() {
    let board = ["CATS", "ACTS", "TACS", "SCAT"];
    let words = dictionary(&["cat", "act", "cats", "scat", "tacs"]);

    let first = find_words(grid(&board), words.clone(), PregelConfig::default().with_parallelism(1))
        .await
        .unwrap();
    let second = find_words(grid(&board), words, PregelConfig::default().with_parallelism(8))
        .await
        .unwrap();

    assert_eq!(first.supersteps, second.supersteps);
    assert_eq!(
        sorted_values(first.into_values()),
        sorted_values(second.into_values())
    );
}

#[tokio::test]
async fn test_terminates_within_longest_word_bound() {
    let words = dictionary(&["cat", "acts", "scatter"]);
    let longest = words.longest_word_len();

    let result = find_words(
        grid(&["CATS", "ACTS", "TACS", "SCAT"]),
        words,
        PregelConfig::default(),
    )
    .await
    .unwrap();

    assert!(result.is_natural());
    assert!(
        result.supersteps <= longest + 1,
        "{} supersteps for longest word {}",
        result.supersteps,
        longest
    );
}

#[tokio::test]
async fn test_superstep_bound_forces_stop() {
    let config = PregelConfig::default().with_max_supersteps(1);
    let result = find_words(grid(&["CAT", "XYZ", "QRS"]), dictionary(&["cat"]), config)
        .await
        .unwrap();

    assert_eq!(result.termination, Termination::Forced);
    assert_eq!(result.supersteps, 1);
    assert!(result.into_values().values().all(Vec::is_empty));
}

/// Delegates to the word search and records every path it is handed
struct PathAuditor {
    inner: BoggleComputation,
    seen: Arc<Mutex<Vec<(VertexId, PathMessage)>>>,
}

#[async_trait]
impl VertexProgram<FoundWords, PathMessage> for PathAuditor {
    async fn compute(
        &self,
        ctx: &mut ComputeContext<'_, FoundWords, PathMessage>,
    ) -> Result<ComputeResult<FoundWords>, PregelError> {
        {
            let mut seen = self.seen.lock().unwrap();
            for message in ctx.messages {
                seen.push((ctx.id().clone(), message.clone()));
            }
        }
        self.inner.compute(ctx).await
    }
}

#[tokio::test]
async fn test_no_path_revisits_a_cell() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let program = PathAuditor {
        inner: BoggleComputation::new(dictionary(&["tact", "stats", "cacts", "attacks"])),
        seen: seen.clone(),
    };

    let mut runtime = PregelRuntime::<FoundWords, PathMessage>::with_config(PregelConfig::default());
    let result = runtime
        .run(grid(&["TACT", "SATS", "CACT", "STAT"]), Arc::new(program))
        .await
        .unwrap();
    assert!(result.is_natural());

    let seen = seen.lock().unwrap();
    assert!(!seen.is_empty());
    for (receiver, message) in seen.iter() {
        assert!(!message.has_duplicate_ids(), "duplicate ids in {:?}", message);
        assert!(!message.visited(receiver), "{} received its own path", receiver);
        assert_eq!(message.visited_path.len(), message.partial_word.chars().count());
    }
}

/// Adds one corrupted path on top of the normal seeds
struct CorruptingProgram {
    inner: BoggleComputation,
}

#[async_trait]
impl VertexProgram<FoundWords, PathMessage> for CorruptingProgram {
    async fn compute(
        &self,
        ctx: &mut ComputeContext<'_, FoundWords, PathMessage>,
    ) -> Result<ComputeResult<FoundWords>, PregelError> {
        if ctx.is_first_superstep() && ctx.id().as_str() == "A" {
            let looped = PathMessage::new("aba", vec!["A".into(), "B".into(), "A".into()]);
            ctx.send_message("B", looped);
        }
        self.inner.compute(ctx).await
    }
}

#[tokio::test]
async fn test_corrupted_path_aborts_run() {
    let program = CorruptingProgram {
        inner: BoggleComputation::new(dictionary(&["abab"])),
    };

    let mut runtime = PregelRuntime::<FoundWords, PathMessage>::new();
    let err = runtime
        .run(parse_adjacency("A B\nB\n").unwrap(), Arc::new(program))
        .await
        .unwrap_err();

    match err {
        PregelError::InvariantViolation { vertex_id, .. } => assert_eq!(vertex_id.as_str(), "B"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_adjacency_file_end_to_end() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# three cells in a row").unwrap();
    writeln!(file, "D O").unwrap();
    writeln!(file, "O G").unwrap();
    writeln!(file, "G").unwrap();

    let values = tokio_test::block_on(async {
        let graph = load_graph(file.path(), BoardFormat::Adjacency).await.unwrap();
        find_words(graph, dictionary(&["dog", "go"]), PregelConfig::default().with_parallelism(2))
            .await
            .unwrap()
            .into_values()
    });

    assert_eq!(words_at(&values, "G"), vec!["dog"]);
    assert_eq!(words_at(&values, "O"), vec!["go"]);
    assert!(words_at(&values, "D").is_empty());
}

#[tokio::test]
async fn test_empty_graph_halts_immediately() {
    let result = find_words(Graph::new(), dictionary(&["a"]), PregelConfig::default())
        .await
        .unwrap();
    assert_eq!(result.supersteps, 0);
    assert!(result.is_natural());
}
