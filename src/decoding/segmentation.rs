use crate::config::ScorerConfig;
use crate::decoding::vocabulary::Vocabulary;

/// Inserts one `pad_id` between every pair of adjacent, differing, non-pad tokens.
///
/// Greedy CTC output such as `[k, k, ae, ae]` carries no blank between `k` and
/// `ae`; the inserted pad makes each run of identical ids its own unit so the
/// decode step never fuses neighbouring phonemes.
pub fn insert_boundary_pads(tokens: &[usize], pad_id: usize) -> Vec<usize> {
    let mut augmented = Vec::with_capacity(tokens.len() * 2);
    for (i, &token) in tokens.iter().enumerate() {
        augmented.push(token);
        if let Some(&next) = tokens.get(i + 1) {
            if token != next && token != pad_id && next != pad_id {
                augmented.push(pad_id);
            }
        }
    }
    augmented
}

/// Decodes a greedy per-frame id sequence into phoneme segments, stripping the
/// conventional `h#` silence marker.
pub fn segment_tokens(tokens: &[usize], pad_id: usize, vocab: &Vocabulary) -> Vec<String> {
    segment_tokens_with_silence(
        tokens,
        pad_id,
        vocab,
        Some(ScorerConfig::DEFAULT_SILENCE_TOKEN),
    )
}

pub fn segment_tokens_with_silence(
    tokens: &[usize],
    pad_id: usize,
    vocab: &Vocabulary,
    silence_token: Option<&str>,
) -> Vec<String> {
    if tokens.is_empty() {
        return Vec::new();
    }

    let augmented = insert_boundary_pads(tokens, pad_id);
    let mut decoded = decode_runs(&augmented, pad_id, vocab);

    if let Some(silence) = silence_token.filter(|s| !s.is_empty()) {
        decoded = decoded.replace(silence, "");
    }

    decoded.split_whitespace().map(str::to_string).collect()
}

/// Joins one symbol per run of identical ids. Pads, special ids, word
/// delimiters and ids without a symbol all decode as a space.
fn decode_runs(augmented: &[usize], pad_id: usize, vocab: &Vocabulary) -> String {
    let mut decoded = String::new();
    let mut prev: Option<usize> = None;

    for &id in augmented {
        let symbol = if id == pad_id || vocab.is_special(id) || vocab.is_word_delimiter(id) {
            None
        } else {
            let symbol = vocab.symbol(id);
            if symbol.is_none() {
                tracing::debug!(token_id = id, "segmenter: dropping id absent from vocabulary");
            }
            symbol
        };

        let Some(symbol) = symbol else {
            decoded.push(' ');
            prev = None;
            continue;
        };

        if prev == Some(id) {
            continue;
        }
        if prev.is_some() {
            decoded.push(' ');
        }
        decoded.push_str(symbol);
        prev = Some(id);
    }

    decoded
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAD_ID: usize = 0;

    fn vocab() -> Vocabulary {
        Vocabulary::from_pairs([
            ("[PAD]", 0),
            ("k", 1),
            ("ae", 2),
            ("t", 3),
            ("h#", 4),
            ("<s>", 5),
            ("|", 6),
            ("sil h#", 7),
        ])
        .with_special_tokens(["[PAD]", "<s>"])
        .with_word_delimiter(Some("|"))
    }

    #[test]
    fn boundary_pads_between_differing_runs() {
        assert_eq!(
            insert_boundary_pads(&[1, 1, 2, 2, 3], PAD_ID),
            vec![1, 1, 0, 2, 2, 0, 3]
        );
    }

    #[test]
    fn boundary_pads_not_added_next_to_existing_pad() {
        assert_eq!(insert_boundary_pads(&[1, 0, 2, 2], PAD_ID), vec![1, 0, 2, 2]);
        assert_eq!(insert_boundary_pads(&[0, 0], PAD_ID), vec![0, 0]);
    }

    #[test]
    fn boundary_pads_exactly_one_per_change() {
        let tokens = [3, 1, 3, 1, 2];
        let augmented = insert_boundary_pads(&tokens, PAD_ID);
        let pads = augmented.iter().filter(|&&t| t == PAD_ID).count();
        assert_eq!(pads, tokens.len() - 1);
        assert_eq!(augmented.len(), tokens.len() * 2 - 1);
    }

    #[test]
    fn empty_input_yields_no_segments() {
        assert!(segment_tokens(&[], PAD_ID, &vocab()).is_empty());
    }

    #[test]
    fn all_pad_input_yields_no_segments() {
        assert!(segment_tokens(&[PAD_ID, PAD_ID], PAD_ID, &vocab()).is_empty());
    }

    #[test]
    fn single_token_input() {
        assert_eq!(segment_tokens(&[2], PAD_ID, &vocab()), vec!["ae"]);
        assert!(segment_tokens(&[PAD_ID], PAD_ID, &vocab()).is_empty());
        assert!(segment_tokens(&[4], PAD_ID, &vocab()).is_empty());
    }

    #[test]
    fn duplicate_runs_collapse_to_one_segment() {
        let segments = segment_tokens(&[0, 1, 1, 1, 2, 2, 0, 0, 3, 3], PAD_ID, &vocab());
        assert_eq!(segments, vec!["k", "ae", "t"]);
    }

    #[test]
    fn same_symbol_across_pad_is_not_merged() {
        let segments = segment_tokens(&[1, 1, 0, 1], PAD_ID, &vocab());
        assert_eq!(segments, vec!["k", "k"]);
    }

    #[test]
    fn silence_marker_is_stripped() {
        let segments = segment_tokens(&[4, 4, 1, 2, 3, 4], PAD_ID, &vocab());
        assert_eq!(segments, vec!["k", "ae", "t"]);
    }

    #[test]
    fn silence_marker_kept_when_disabled() {
        let segments = segment_tokens_with_silence(&[4, 1], PAD_ID, &vocab(), None);
        assert_eq!(segments, vec!["h#", "k"]);
    }

    #[test]
    fn special_and_delimiter_ids_act_as_separators() {
        let segments = segment_tokens(&[5, 1, 6, 2, 5], PAD_ID, &vocab());
        assert_eq!(segments, vec!["k", "ae"]);
    }

    #[test]
    fn whitespace_inside_symbol_splits_segments() {
        let segments = segment_tokens(&[7, 1], PAD_ID, &vocab());
        assert_eq!(segments, vec!["sil", "k"]);
    }

    #[test]
    fn unknown_ids_are_dropped() {
        let segments = segment_tokens(&[1, 42, 2], PAD_ID, &vocab());
        assert_eq!(segments, vec!["k", "ae"]);
    }

    #[test]
    fn segmentation_is_deterministic() {
        let tokens = [0, 1, 1, 0, 2, 3, 3, 4];
        let first = segment_tokens(&tokens, PAD_ID, &vocab());
        let second = segment_tokens(&tokens, PAD_ID, &vocab());
        assert_eq!(first, second);
        assert!(first.iter().all(|s| !s.is_empty()));
    }
}
