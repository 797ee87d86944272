//! Wrong-answer notes and weakness analysis
//!
//! Rankings are derived on demand by grouping the grammar and vocabulary
//! tags of every wrong answer; nothing derived is stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use lingo_records::{Identified, RecordKey, RecordStore};

use crate::area::StudyArea;
use crate::statistics::SubjectStatistics;
use crate::Result;

const RANKING_LIMIT: usize = 5;
const TAG_EXAMPLE_LIMIT: usize = 3;
const AREA_EXAMPLE_LIMIT: usize = 2;
/// Areas with wrong answers and an average below this are weak
const AREA_WEAKNESS_SCORE: f64 = 80.0;
/// Completed areas averaging below this are flagged in the summary
const LOW_AVERAGE_SCORE: f64 = 70.0;
/// Grammar tags above this share of wrong answers are flagged
const FREQUENT_GRAMMAR_PERCENT: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrongAnswer {
    pub id: String,
    pub question: String,
    /// Practice area or question format as recorded by the page
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub my_answer: String,
    #[serde(default)]
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: String,
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "crate::serde_blank::tags")]
    pub grammar: Vec<String>,
    #[serde(default, deserialize_with = "crate::serde_blank::tags")]
    pub vocabulary: Vec<String>,
}

impl WrongAnswer {
    pub fn new(
        question: impl Into<String>,
        kind: impl Into<String>,
        my_answer: impl Into<String>,
        correct_answer: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            question: question.into(),
            kind: kind.into(),
            my_answer: my_answer.into(),
            correct_answer: correct_answer.into(),
            explanation: String::new(),
            date,
            grammar: Vec::new(),
            vocabulary: Vec::new(),
        }
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    pub fn with_grammar(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.grammar = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_vocabulary(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.vocabulary = tags.into_iter().map(Into::into).collect();
        self
    }

    /// The practice area, when `kind` names one.
    pub fn area(&self) -> Option<StudyArea> {
        self.kind.parse().ok()
    }

    fn example(&self) -> AnswerExample {
        AnswerExample {
            question: self.question.clone(),
            my_answer: self.my_answer.clone(),
            correct_answer: self.correct_answer.clone(),
        }
    }
}

impl Identified for WrongAnswer {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerExample {
    pub question: String,
    pub my_answer: String,
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrammarWeakness {
    pub grammar: String,
    pub count: usize,
    /// Share of all wrong answers, rounded
    pub percentage: u32,
    pub examples: Vec<AnswerExample>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WordDifficulty {
    Easy,
    Medium,
    Hard,
}

impl WordDifficulty {
    pub fn from_misses(count: usize) -> Self {
        match count {
            0..=1 => WordDifficulty::Easy,
            2..=3 => WordDifficulty::Medium,
            _ => WordDifficulty::Hard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VocabularyWeakness {
    pub word: String,
    pub count: usize,
    pub difficulty: WordDifficulty,
    pub examples: Vec<AnswerExample>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaWeakness {
    pub area: String,
    pub count: usize,
    /// Average practice score for the area, 0 when unknown
    pub score: f64,
    pub examples: Vec<AnswerExample>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Weakness {
    LowAreaScore { area: StudyArea, average_score: f64 },
    FrequentGrammar { grammar: String, count: usize, percentage: u32 },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeaknessReport {
    pub total_wrong: usize,
    pub grammar: Vec<GrammarWeakness>,
    pub vocabulary: Vec<VocabularyWeakness>,
    pub areas: Vec<AreaWeakness>,
    pub summary: Vec<Weakness>,
}

/// Tag -> (count, examples), in first-seen order.
struct TagGroups {
    index: HashMap<String, usize>,
    groups: Vec<(String, usize, Vec<AnswerExample>)>,
    example_limit: usize,
}

impl TagGroups {
    fn new(example_limit: usize) -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
            example_limit,
        }
    }

    fn add(&mut self, tag: &str, answer: &WrongAnswer) {
        let slot = match self.index.get(tag) {
            Some(&i) => i,
            None => {
                self.index.insert(tag.to_string(), self.groups.len());
                self.groups.push((tag.to_string(), 0, Vec::new()));
                self.groups.len() - 1
            }
        };

        let group = &mut self.groups[slot];
        group.1 += 1;
        if group.2.len() < self.example_limit {
            group.2.push(answer.example());
        }
    }

    /// Most frequent first; equal counts keep first-seen order.
    fn ranked(mut self) -> Vec<(String, usize, Vec<AnswerExample>)> {
        self.groups.sort_by(|a, b| b.1.cmp(&a.1));
        self.groups
    }
}

fn percent(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u32
}

pub fn analyze_weaknesses(answers: &[WrongAnswer], stats: &SubjectStatistics) -> WeaknessReport {
    let total = answers.len();
    let mut grammar = TagGroups::new(TAG_EXAMPLE_LIMIT);
    let mut vocabulary = TagGroups::new(TAG_EXAMPLE_LIMIT);
    let mut areas = TagGroups::new(AREA_EXAMPLE_LIMIT);

    for answer in answers {
        if !answer.kind.trim().is_empty() {
            areas.add(answer.kind.trim(), answer);
        }
        for tag in &answer.grammar {
            grammar.add(tag, answer);
        }
        for tag in &answer.vocabulary {
            vocabulary.add(tag, answer);
        }
    }

    let grammar: Vec<GrammarWeakness> = grammar
        .ranked()
        .into_iter()
        .take(RANKING_LIMIT)
        .map(|(tag, count, examples)| GrammarWeakness {
            grammar: tag,
            count,
            percentage: percent(count, total),
            examples,
        })
        .collect();

    let vocabulary = vocabulary
        .ranked()
        .into_iter()
        .take(RANKING_LIMIT)
        .map(|(word, count, examples)| VocabularyWeakness {
            word,
            count,
            difficulty: WordDifficulty::from_misses(count),
            examples,
        })
        .collect();

    let mut areas: Vec<AreaWeakness> = areas
        .groups
        .into_iter()
        .map(|(area, count, examples)| {
            let score = area
                .parse::<StudyArea>()
                .map(|a| stats.area(a).average_score)
                .unwrap_or(0.0);
            AreaWeakness {
                area,
                count,
                score,
                examples,
            }
        })
        .filter(|a| a.count > 0 && a.score < AREA_WEAKNESS_SCORE)
        .collect();
    areas.sort_by(|a, b| a.score.total_cmp(&b.score));

    let mut summary: Vec<Weakness> = StudyArea::ALL
        .iter()
        .filter_map(|&area| {
            let s = stats.area(area);
            (s.completed > 0 && s.average_score < LOW_AVERAGE_SCORE).then_some(
                Weakness::LowAreaScore {
                    area,
                    average_score: s.average_score,
                },
            )
        })
        .collect();
    summary.extend(
        grammar
            .iter()
            .filter(|g| g.percentage > FREQUENT_GRAMMAR_PERCENT)
            .map(|g| Weakness::FrequentGrammar {
                grammar: g.grammar.clone(),
                count: g.count,
                percentage: g.percentage,
            }),
    );

    WeaknessReport {
        total_wrong: total,
        grammar,
        vocabulary,
        areas,
        summary,
    }
}

pub struct WrongAnswerNote {
    store: RecordStore,
}

impl WrongAnswerNote {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Newest first
    pub fn list(&self) -> Result<Vec<WrongAnswer>> {
        Ok(self.store.read_or_default(RecordKey::WrongAnswers)?)
    }

    pub fn add(&self, answer: WrongAnswer) -> Result<()> {
        self.store
            .update(RecordKey::WrongAnswers, Vec::new(), |answers: &mut Vec<WrongAnswer>| {
                answers.insert(0, answer)
            })?;
        Ok(())
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        Ok(self
            .store
            .remove_by_id::<WrongAnswer, _>(RecordKey::WrongAnswers, id)?)
    }

    pub fn report(&self, stats: &SubjectStatistics) -> Result<WeaknessReport> {
        Ok(analyze_weaknesses(&self.list()?, stats))
    }
}

impl Clone for WrongAnswerNote {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}
