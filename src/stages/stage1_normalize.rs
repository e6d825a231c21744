use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::{
    alignment_entries, read_voices, NormalizedTranscript, SpeakerDirectory, TranscriptLine,
    WordToken,
};

/// Execute Stage 1: group aligned words into speaker runs
///
/// This stage:
/// 1. Extracts the alignment array (required)
/// 2. Builds the speaker directory from the voice list (optional)
/// 3. Emits a header whenever the speaker changes, including before the
///    first word, followed by the space-joined words of that run
pub fn normalize(document: &Value) -> Result<NormalizedTranscript> {
    let entries = alignment_entries(document)?;

    let directory = match read_voices(document) {
        Some(voices) => SpeakerDirectory::from_voices(voices),
        None => {
            warn!("No usable voice list in payload, using generated speaker labels");
            SpeakerDirectory::default()
        }
    };
    debug!("Speaker directory has {} entries", directory.len());

    let tokens: Vec<WordToken> = entries.iter().map(WordToken::from_alignment_entry).collect();
    let transcript = group_tokens(&tokens, &directory);

    info!(
        "Normalized {} tokens into {} speaker runs",
        tokens.len(),
        transcript.header_count()
    );

    Ok(transcript)
}

/// Coalesce consecutive same-speaker tokens into header + text line pairs
pub fn group_tokens(tokens: &[WordToken], directory: &SpeakerDirectory) -> NormalizedTranscript {
    let mut lines = Vec::new();
    // None never equals a real (or empty) speaker ID, so the first token opens a run
    let mut current_speaker: Option<&str> = None;
    let mut current_words: Vec<&str> = Vec::new();

    for token in tokens {
        if current_speaker != Some(token.speaker_id.as_str()) {
            if !current_words.is_empty() {
                lines.push(text_line(&current_words));
                current_words.clear();
            }
            lines.push(TranscriptLine::Header {
                speaker_id: token.speaker_id.clone(),
                name: directory.display_name(&token.speaker_id),
            });
            current_speaker = Some(token.speaker_id.as_str());
        }

        current_words.push(token.word.as_str());
    }

    if !current_words.is_empty() {
        lines.push(text_line(&current_words));
    }

    NormalizedTranscript { lines }
}

fn text_line(words: &[&str]) -> TranscriptLine {
    TranscriptLine::Text {
        text: words.join(" "),
        words: words.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CleanerError;
    use crate::models::TranscriptStats;
    use serde_json::json;

    fn document(alignment: Value, voices: Option<Value>) -> Value {
        let mut doc = json!({
            "mediaLibrary": {"mediaRefs": [{"voiceover": {"metadata": {"alignment": alignment}}}]}
        });
        if let Some(voices) = voices {
            doc["voices"] = voices;
        }
        doc
    }

    fn entry(word: &str, speaker: &str) -> Value {
        json!({"word": word, "speaker": {"speakerId": speaker}})
    }

    #[test]
    fn test_two_speakers_with_fallback() {
        let doc = document(
            json!([entry("Hi", "A1"), entry("there", "A1"), entry("Hey", "B2")]),
            Some(json!([{"id": "A1", "name": "Alice"}])),
        );

        let transcript = normalize(&doc).unwrap();

        assert_eq!(
            transcript.text_lines(),
            vec!["", "Alice", "Hi there", "", "Speaker B2", "Hey"]
        );
    }

    #[test]
    fn test_empty_alignment() {
        let doc = document(json!([]), None);
        let transcript = normalize(&doc).unwrap();

        assert!(transcript.is_empty());
        assert_eq!(transcript.to_text(), "");
    }

    #[test]
    fn test_missing_alignment() {
        let doc = json!({"mediaLibrary": {"mediaRefs": [{"voiceover": {"metadata": {}}}]}});
        let err = normalize(&doc).unwrap_err();
        assert!(matches!(err, CleanerError::MissingAlignment { .. }));
    }

    #[test]
    fn test_non_contiguous_runs_get_new_headers() {
        let doc = document(
            json!([
                entry("one", "A1"),
                entry("two", "B2"),
                entry("three", "A1"),
                entry("four", "A1")
            ]),
            Some(json!([{"id": "A1", "name": "Alice"}, {"id": "B2", "name": "Bob"}])),
        );

        let transcript = normalize(&doc).unwrap();

        assert_eq!(transcript.header_count(), 3);
        assert_eq!(
            transcript.to_text(),
            "\nAlice\none\n\nBob\ntwo\n\nAlice\nthree four"
        );
    }

    #[test]
    fn test_empty_words_keep_their_slot() {
        let doc = document(
            json!([entry("a", "A1"), entry("", "A1"), entry("b", "A1"), entry("", "B2")]),
            None,
        );

        let transcript = normalize(&doc).unwrap();

        assert_eq!(
            transcript.text_lines(),
            vec!["", "Speaker A1", "a  b", "", "Speaker B2", ""]
        );
    }

    #[test]
    fn test_missing_speaker_is_empty_id() {
        let doc = document(json!([{"word": "hello"}, {"word": "world", "speaker": {}}]), None);

        let transcript = normalize(&doc).unwrap();

        assert_eq!(transcript.text_lines(), vec!["", "Speaker ", "hello world"]);
    }

    #[test]
    fn test_header_and_word_counts() {
        let speakers = ["x", "x", "y", "y", "y", "x", "z", "z"];
        let alignment: Vec<Value> = speakers
            .iter()
            .enumerate()
            .map(|(i, s)| entry(&format!("w{}", i), s))
            .collect();
        let doc = document(Value::Array(alignment), None);

        let transcript = normalize(&doc).unwrap();
        let runs = transcript.runs();

        assert_eq!(transcript.header_count(), 4);
        assert_eq!(runs.iter().map(|r| r.words).sum::<usize>(), speakers.len());
    }

    #[test]
    fn test_stats_count_tokens_not_spaces() {
        let doc = document(
            json!([entry("New York", "A1"), entry("", "A1"), entry("again", "B2")]),
            None,
        );

        let transcript = normalize(&doc).unwrap();
        let stats = TranscriptStats::from_transcript(&transcript);

        assert_eq!(stats.total_words, 3);
        assert_eq!(stats.speakers[0].words, 2);
        assert_eq!(stats.speakers[1].words, 1);
    }

    #[test]
    fn test_voice_with_numeric_id_keeps_other_names() {
        let doc = document(
            json!([entry("hi", "A1")]),
            Some(json!([{"id": "A1", "name": "Alice"}, {"id": 7, "name": "Bot"}])),
        );

        let transcript = normalize(&doc).unwrap();

        assert_eq!(transcript.text_lines(), vec!["", "Alice", "hi"]);
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let doc = document(
            json!([entry("a", "S1"), entry("b", "S2"), entry("c", "S1")]),
            Some(json!([{"id": "S1", "name": "Sam"}])),
        );

        assert_eq!(
            normalize(&doc).unwrap().to_text(),
            normalize(&doc).unwrap().to_text()
        );
    }
}
