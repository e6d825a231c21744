use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::Voice;

/// Number of speaker ID characters kept in a generated label
const FALLBACK_ID_CHARS: usize = 6;

/// A single word from the alignment array with its speaker attribution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordToken {
    /// The word text, empty when the entry carries none
    pub word: String,
    /// Speaker identifier, empty when the entry carries none
    pub speaker_id: String,
}

impl WordToken {
    /// Read a token from an alignment entry (`{"word": .., "speaker": {"speakerId": ..}}`)
    pub fn from_alignment_entry(entry: &Value) -> Self {
        let word = entry
            .get("word")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let speaker_id = entry
            .get("speaker")
            .and_then(|s| s.get("speakerId"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Self { word, speaker_id }
    }
}

/// Maps speaker IDs to display names
#[derive(Debug, Clone, Default)]
pub struct SpeakerDirectory {
    names: HashMap<String, String>,
}

impl SpeakerDirectory {
    pub fn from_voices(voices: impl IntoIterator<Item = Voice>) -> Self {
        Self {
            names: voices.into_iter().map(|v| (v.id, v.name)).collect(),
        }
    }

    /// Display name for a speaker, falling back to a label built from the ID
    pub fn display_name(&self, speaker_id: &str) -> String {
        self.names
            .get(speaker_id)
            .cloned()
            .unwrap_or_else(|| fallback_name(speaker_id))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// `"Speaker "` followed by the first six characters of the ID
pub fn fallback_name(speaker_id: &str) -> String {
    let prefix: String = speaker_id.chars().take(FALLBACK_ID_CHARS).collect();
    format!("Speaker {}", prefix)
}

/// A line of the rendered transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptLine {
    /// Speaker change marker; renders as a blank line followed by the name
    Header { speaker_id: String, name: String },
    /// Space-joined words of one uninterrupted speaker run, with the number
    /// of alignment tokens it was built from
    Text { text: String, words: usize },
}

impl TranscriptLine {
    /// Physical lines this entry occupies in the joined text
    pub fn rendered(&self) -> Vec<&str> {
        match self {
            TranscriptLine::Header { name, .. } => vec!["", name.as_str()],
            TranscriptLine::Text { text, .. } => vec![text.as_str()],
        }
    }

    pub fn is_header(&self) -> bool {
        matches!(self, TranscriptLine::Header { .. })
    }
}

/// Speaker-grouped transcript, ready to be joined into text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedTranscript {
    pub lines: Vec<TranscriptLine>,
}

impl NormalizedTranscript {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of speaker headers (one per contiguous speaker run)
    pub fn header_count(&self) -> usize {
        self.lines.iter().filter(|l| l.is_header()).count()
    }

    /// All physical lines, in order
    pub fn text_lines(&self) -> Vec<&str> {
        self.lines.iter().flat_map(TranscriptLine::rendered).collect()
    }

    /// Newline-joined transcript text
    pub fn to_text(&self) -> String {
        self.text_lines().join("\n")
    }

    /// Pair each header with the text line that follows it
    pub fn runs(&self) -> Vec<SpeakerRun<'_>> {
        let mut runs = Vec::new();
        let mut iter = self.lines.iter().peekable();

        while let Some(line) = iter.next() {
            if let TranscriptLine::Header { speaker_id, name } = line {
                let (text, words) = match iter.peek().copied() {
                    Some(TranscriptLine::Text { text, words }) => {
                        iter.next();
                        (text.as_str(), *words)
                    }
                    _ => ("", 0),
                };
                runs.push(SpeakerRun {
                    speaker_id: speaker_id.as_str(),
                    name: name.as_str(),
                    text,
                    words,
                });
            }
        }

        runs
    }
}

impl fmt::Display for NormalizedTranscript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// A maximal contiguous stretch of words from one speaker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeakerRun<'a> {
    pub speaker_id: &'a str,
    pub name: &'a str,
    pub text: &'a str,
    /// Alignment tokens in the run; empty words still count
    pub words: usize,
}

/// Per-speaker totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeakerStats {
    pub speaker_id: String,
    pub name: String,
    pub words: usize,
    pub runs: usize,
}

/// Summary of a normalized transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptStats {
    pub total_words: usize,
    pub total_runs: usize,
    /// Speakers in order of first appearance
    pub speakers: Vec<SpeakerStats>,
}

impl TranscriptStats {
    pub fn from_transcript(transcript: &NormalizedTranscript) -> Self {
        let mut speakers: Vec<SpeakerStats> = Vec::new();
        let mut total_words = 0;
        let runs = transcript.runs();

        for run in &runs {
            let words = run.words;
            total_words += words;

            match speakers.iter_mut().find(|s| s.speaker_id == run.speaker_id) {
                Some(stats) => {
                    stats.words += words;
                    stats.runs += 1;
                }
                None => speakers.push(SpeakerStats {
                    speaker_id: run.speaker_id.to_string(),
                    name: run.name.to_string(),
                    words,
                    runs: 1,
                }),
            }
        }

        Self {
            total_words,
            total_runs: runs.len(),
            speakers,
        }
    }
}
