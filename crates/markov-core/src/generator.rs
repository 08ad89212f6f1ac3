//! Iteratively fills a POS skeleton by repeated projection and weighted
//! sampling, conditioned on pre-seeded subject anchors.

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use crate::config::EngineConfig;
use crate::error::{MarkovError, Result};
use crate::pos::Pos;
use crate::projection::ProjectionCollection;
use crate::trie::Trie;
use crate::word::Word;

/// Fill `skeleton` using `subjects` as pre-seeded anchors, sampling from
/// `trie` with `rng`. See the projection and sweep description in the
/// module-level documentation of the crate.
pub fn generate<R: Rng>(
    trie: &Trie,
    skeleton: &[Pos],
    subjects: &[Word],
    config: &EngineConfig,
    rng: &mut R,
) -> Result<Vec<Vec<Word>>> {
    let (sentence_structures, mut sentence_generations) = split_sentences(skeleton);
    let sorted_subjects = sort_subjects(subjects, &config.subject_pos_priority);
    assign_subjects(&sentence_structures, &mut sentence_generations, &sorted_subjects)?;
    fill(&sentence_structures, &mut sentence_generations, trie, config, rng)?;

    Ok(sentence_generations
        .into_iter()
        .map(|sentence| {
            sentence
                .into_iter()
                .map(|w| w.expect("fill only returns once every slot is non-empty"))
                .collect()
        })
        .collect())
}

/// Phase 1 — split the skeleton at each `Eos`, discarding empty segments.
fn split_sentences(skeleton: &[Pos]) -> (Vec<Vec<Pos>>, Vec<Vec<Option<Word>>>) {
    let mut structures = Vec::new();
    let mut generations = Vec::new();
    let mut start = 0;

    for (idx, &pos) in skeleton.iter().enumerate() {
        if pos == Pos::Eos {
            let segment = &skeleton[start..idx];
            if !segment.is_empty() {
                generations.push(vec![None; segment.len()]);
                structures.push(segment.to_vec());
            }
            start = idx + 1;
        }
    }

    (structures, generations)
}

/// Phase 2 — sort subjects by priority. Subjects whose POS is not in the
/// priority list are dropped.
fn sort_subjects(subjects: &[Word], priority: &[Pos]) -> Vec<Word> {
    let mut sorted = Vec::new();
    for &pos in priority {
        for subject in subjects {
            if subject.pos == pos {
                sorted.push(subject.clone());
            }
        }
    }
    sorted
}

/// Phase 3 — assign one subject per slot, scanning each sentence
/// left-to-right. A subject is never marked consumed, so the same subject
/// can fill more than one matching slot in a sentence; this is a known
/// quirk carried over deliberately, not a bug to fix.
fn assign_subjects(
    structures: &[Vec<Pos>],
    generations: &mut [Vec<Option<Word>>],
    sorted_subjects: &[Word],
) -> Result<()> {
    let mut any_assigned = vec![false; structures.len()];

    for (sentence_idx, structure) in structures.iter().enumerate() {
        for (word_idx, &pos) in structure.iter().enumerate() {
            for subject in sorted_subjects {
                if subject.pos == pos {
                    generations[sentence_idx][word_idx] = Some(subject.clone());
                    any_assigned[sentence_idx] = true;
                    break;
                }
            }
        }
    }

    if any_assigned.into_iter().any(|assigned| !assigned) {
        return Err(MarkovError::NoAnchor);
    }
    Ok(())
}

/// Phase 4 — iteratively fill blanks until none remain or no progress is
/// made in a full pass.
fn fill<R: Rng>(
    structures: &[Vec<Pos>],
    generations: &mut [Vec<Option<Word>>],
    trie: &Trie,
    config: &EngineConfig,
    rng: &mut R,
) -> Result<()> {
    let mut work_left = count_blanks(generations);

    loop {
        for (sentence_idx, structure) in structures.iter().enumerate() {
            let generation = &mut generations[sentence_idx];

            let (blank_idx, project_idx) = find_blank_and_anchor(generation, false, config.window_size);
            handle_projections(structure, generation, blank_idx, &project_idx, trie, config, rng);

            let (blank_idx, project_idx) = find_blank_and_anchor(generation, true, config.window_size);
            handle_projections(structure, generation, blank_idx, &project_idx, trie, config, rng);
        }

        let new_work_left = count_blanks(generations);
        if new_work_left == 0 {
            return Ok(());
        }
        if new_work_left == work_left {
            return Err(MarkovError::Stuck);
        }
        work_left = new_work_left;
    }
}

fn count_blanks(generations: &[Vec<Option<Word>>]) -> usize {
    generations.iter().flatten().filter(|w| w.is_none()).count()
}

/// One directional scan: find the blank this sweep will try to fill, and
/// the first filled, in-window slot past it in the scan direction.
/// `reverse = false` walks ascending indices (leftmost blank, anchor to
/// its right); `reverse = true` walks descending indices (rightmost
/// blank, anchor to its left).
fn find_blank_and_anchor(
    generation: &[Option<Word>],
    reverse: bool,
    window: u32,
) -> (Option<usize>, Vec<usize>) {
    let mut blank_idx = None;
    let mut project_idx = Vec::new();

    let indices: Box<dyn Iterator<Item = usize>> = if reverse {
        Box::new((0..generation.len()).rev())
    } else {
        Box::new(0..generation.len())
    };

    for idx in indices {
        match &generation[idx] {
            None => blank_idx = Some(idx),
            Some(_) => {
                if let Some(b) = blank_idx {
                    let distance = (b as i64 - idx as i64).abs() as u32;
                    if distance <= window {
                        project_idx.push(idx);
                        break;
                    }
                }
            }
        }
    }

    (blank_idx, project_idx)
}

/// Project every anchor in `project_idx` toward `blank_idx`, sample one
/// candidate word, and place it. No-ops if there is no blank, no anchors,
/// an empty projection collection, or a zero-sum probability column. If
/// the sampled key fails to resolve through `trie.select`, the slot is
/// left blank.
fn handle_projections<R: Rng>(
    structure: &[Pos],
    generation: &mut [Option<Word>],
    blank_idx: Option<usize>,
    project_idx: &[usize],
    trie: &Trie,
    config: &EngineConfig,
    rng: &mut R,
) {
    let Some(blank_idx) = blank_idx else { return };
    if project_idx.is_empty() {
        return;
    }

    let sentence_len = generation.len();
    let blank_pos = structure[blank_idx];

    let projections = project_idx
        .iter()
        .filter_map(|&idx| {
            generation[idx]
                .as_ref()
                .map(|word| word.project(idx, sentence_len, blank_pos, config))
        })
        .collect();

    let collection = ProjectionCollection::concat(projections);
    if collection.is_empty() {
        return;
    }

    let Some(probabilities) = collection.probability_column(blank_idx) else {
        return;
    };

    let Ok(dist) = WeightedIndex::new(&probabilities) else {
        return;
    };
    let choice = dist.sample(rng);

    if let Some(word) = trie.select(&collection.keys[choice]) {
        generation[blank_idx] = Some(word);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbor::Neighbor;
    use crate::trainer::{Token, Trainer};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    fn train_corpus(trie: &mut Trie, window: u32) {
        let sentence = vec![
            Token::new("cat", Pos::Noun),
            Token::new("sat", Pos::Verb),
            Token::new("mat", Pos::Noun),
        ];
        let doc = vec![sentence; 100];
        Trainer::new(trie, window).learn(&doc);
    }

    #[test]
    fn deterministic_generation_s3() {
        let mut trie = Trie::new();
        train_corpus(&mut trie, 8);
        let config = EngineConfig::default();
        let subjects = vec![trie.select("cat").unwrap()];
        let skeleton = vec![Pos::Noun, Pos::Verb, Pos::Noun, Pos::Eos];

        let result = generate(&trie, &skeleton, &subjects, &config, &mut rng()).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].len(), 3);
        assert_eq!(result[0][0].text, "cat");
        assert_eq!(result[0][0].pos, Pos::Noun);
        assert_eq!(result[0][1].pos, Pos::Verb);
        assert_eq!(result[0][2].pos, Pos::Noun);
    }

    #[test]
    fn no_anchor_s4() {
        let mut trie = Trie::new();
        train_corpus(&mut trie, 8);
        let config = EngineConfig::default();
        let subjects = vec![trie.select("cat").unwrap()]; // Noun, skeleton wants Adj
        let skeleton = vec![Pos::Adj, Pos::Eos];

        let err = generate(&trie, &skeleton, &subjects, &config, &mut rng()).unwrap_err();
        assert_eq!(err, MarkovError::NoAnchor);
    }

    #[test]
    fn stuck_detection_s6() {
        let mut trie = Trie::new();
        train_corpus(&mut trie, 8); // no ADV neighbors exist anywhere
        let config = EngineConfig::default();
        let subjects = vec![trie.select("cat").unwrap()];
        let skeleton = vec![Pos::Noun, Pos::Adv, Pos::Noun, Pos::Eos];

        let err = generate(&trie, &skeleton, &subjects, &config, &mut rng()).unwrap_err();
        assert_eq!(err, MarkovError::Stuck);
    }

    #[test]
    fn empty_skeleton_yields_empty_output() {
        let trie = Trie::new();
        let config = EngineConfig::default();
        let result = generate(&trie, &[], &[], &config, &mut rng()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn subjects_with_unlisted_pos_are_dropped_before_assignment() {
        let subjects = vec![Word::new("quickly", Pos::Adv)];
        let priority = vec![Pos::Propn, Pos::Noun, Pos::Pron];
        assert!(sort_subjects(&subjects, &priority).is_empty());
    }

    #[test]
    fn same_subject_can_fill_multiple_slots_of_its_pos() {
        let structures = vec![vec![Pos::Noun, Pos::Verb, Pos::Noun]];
        let mut generations = vec![vec![None, None, None]];
        let mut cat = Word::new("cat", Pos::Noun);
        cat.set_neighbor(Neighbor::fresh("sat", Pos::Verb, 8));
        let subjects = vec![cat];

        assign_subjects(&structures, &mut generations, &subjects).unwrap();
        assert_eq!(generations[0][0].as_ref().unwrap().text, "cat");
        assert_eq!(generations[0][2].as_ref().unwrap().text, "cat");
    }
}
