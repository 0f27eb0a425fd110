use std::collections::HashSet;

use crate::quiz::shuffle::shuffled;
use crate::types::Word;

/// Builds the multiple-choice option set for `target`: up to three
/// distinct sibling meanings plus the correct one, in random order. The
/// correct meaning appears exactly once; glosses identical to it are
/// never used as distractors. A pool with fewer than four distinct
/// meanings simply yields a smaller set.
pub fn build_options(target: &Word, pool: &[Word]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut distractors: Vec<String> = Vec::new();

    for word in pool {
        if word.id == target.id || word.meaning == target.meaning {
            continue;
        }
        if seen.insert(word.meaning.as_str()) {
            distractors.push(word.meaning.clone());
        }
    }

    let mut options: Vec<String> = shuffled(&distractors).into_iter().take(3).collect();
    options.push(target.meaning.clone());
    shuffled(&options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn pool(meanings: &[&str]) -> Vec<Word> {
        let date = NaiveDate::from_ymd_opt(2025, 6, 9).unwrap();
        meanings
            .iter()
            .enumerate()
            .map(|(i, meaning)| {
                Word::new(
                    format!("id-{i}"),
                    format!("word{i}"),
                    *meaning,
                    format!("Example {i}."),
                    date,
                )
            })
            .collect()
    }

    #[test]
    fn test_correct_meaning_present_exactly_once() {
        let words = pool(&["옹호하다", "불일치", "입증하다", "확산", "완화하다"]);
        for target in &words {
            let options = build_options(target, &words);
            assert_eq!(options.len(), 4);
            let hits = options.iter().filter(|o| **o == target.meaning).count();
            assert_eq!(hits, 1);
        }
    }

    #[test]
    fn test_no_duplicate_options() {
        let words = pool(&["옹호하다", "불일치", "입증하다", "확산", "완화하다"]);
        let options = build_options(&words[0], &words);
        let unique: HashSet<&String> = options.iter().collect();
        assert_eq!(unique.len(), options.len());
    }

    #[test]
    fn test_small_pool_yields_variable_size_set() {
        let words = pool(&["옹호하다", "불일치"]);
        let options = build_options(&words[0], &words);
        assert_eq!(options.len(), 2);
        assert!(options.contains(&"옹호하다".to_string()));
    }

    #[test]
    fn test_sibling_with_same_gloss_is_not_a_distractor() {
        let words = pool(&["완화하다", "완화하다", "불일치", "확산"]);
        let options = build_options(&words[0], &words);
        let hits = options.iter().filter(|o| o.as_str() == "완화하다").count();
        assert_eq!(hits, 1);
        assert_eq!(options.len(), 3);
    }

    #[test]
    fn test_singleton_pool_has_only_the_answer() {
        let words = pool(&["옹호하다"]);
        let options = build_options(&words[0], &words);
        assert_eq!(options, vec!["옹호하다".to_string()]);
    }
}
