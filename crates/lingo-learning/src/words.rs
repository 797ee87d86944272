//! Static recommended-word table, ten words per CEFR level

use serde::Serialize;

use crate::level::CefrLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecommendedWord {
    pub word: &'static str,
    pub meaning: &'static str,
    pub example: &'static str,
}

const fn word(word: &'static str, meaning: &'static str, example: &'static str) -> RecommendedWord {
    RecommendedWord {
        word,
        meaning,
        example,
    }
}

const A1: &[RecommendedWord] = &[
    word("hello", "안녕하세요", "Hello, how are you?"),
    word("book", "책", "I read a book every day."),
    word("water", "물", "I drink water."),
    word("friend", "친구", "She is my friend."),
    word("house", "집", "This is my house."),
    word("family", "가족", "I love my family."),
    word("school", "학교", "I go to school."),
    word("happy", "행복한", "I am happy today."),
    word("food", "음식", "I like Korean food."),
    word("time", "시간", "What time is it?"),
];

const A2: &[RecommendedWord] = &[
    word("important", "중요한", "This is very important."),
    word("different", "다른", "We are different."),
    word("possible", "가능한", "Everything is possible."),
    word("problem", "문제", "We have a problem."),
    word("answer", "답, 대답하다", "I know the answer."),
    word("question", "질문", "Can I ask a question?"),
    word("beautiful", "아름다운", "She is beautiful."),
    word("difficult", "어려운", "This is difficult."),
    word("easy", "쉬운", "English is easy."),
    word("remember", "기억하다", "I remember you."),
];

const B1: &[RecommendedWord] = &[
    word("although", "비록 ~이지만", "Although it rained, we went out."),
    word("achieve", "달성하다", "I want to achieve my goals."),
    word("benefit", "이익, 혜택", "Exercise has many benefits."),
    word("challenge", "도전", "This is a big challenge."),
    word("consider", "고려하다", "I will consider your idea."),
    word("develop", "개발하다, 발전하다", "We need to develop new skills."),
    word("experience", "경험", "I have experience in teaching."),
    word("improve", "개선하다", "I want to improve my English."),
    word("opportunity", "기회", "This is a great opportunity."),
    word("suggest", "제안하다", "I suggest we meet tomorrow."),
];

const B2: &[RecommendedWord] = &[
    word("accomplish", "성취하다", "We can accomplish our goals."),
    word("analyze", "분석하다", "Let me analyze the data."),
    word("appreciate", "감사하다, 감상하다", "I appreciate your help."),
    word("approach", "접근하다, 방법", "We need a new approach."),
    word("assume", "가정하다", "I assume you know this."),
    word("contribute", "기여하다", "Everyone can contribute."),
    word("demonstrate", "증명하다, 시연하다", "Let me demonstrate this."),
    word("establish", "설립하다", "We need to establish rules."),
    word("evaluate", "평가하다", "We should evaluate the results."),
    word("indicate", "나타내다", "The data indicates success."),
];

const C1: &[RecommendedWord] = &[
    word("accomplish", "성취하다", "We accomplished our mission."),
    word("comprehensive", "포괄적인", "This is a comprehensive study."),
    word("contemporary", "현대의", "Contemporary art is interesting."),
    word("distinguish", "구별하다", "Can you distinguish them?"),
    word("elaborate", "상세한, 설명하다", "Please elaborate on this."),
    word("facilitate", "촉진하다", "This will facilitate learning."),
    word("fundamental", "근본적인", "This is fundamental knowledge."),
    word("hypothesis", "가설", "Let me test this hypothesis."),
    word("implement", "구현하다", "We need to implement this plan."),
    word("phenomenon", "현상", "This is an interesting phenomenon."),
];

const C2: &[RecommendedWord] = &[
    word("ambiguous", "모호한", "The statement was ambiguous."),
    word("comprehensive", "포괄적인", "A comprehensive analysis."),
    word("controversial", "논란의 여지가 있는", "This is controversial."),
    word("elaborate", "정교한", "An elaborate design."),
    word("inevitable", "불가피한", "Change is inevitable."),
    word("paradox", "역설", "This is a paradox."),
    word("phenomenon", "현상", "A rare phenomenon."),
    word("sophisticated", "정교한, 세련된", "A sophisticated system."),
    word("ubiquitous", "어디에나 있는", "Technology is ubiquitous."),
    word("versatile", "다재다능한", "A versatile tool."),
];

/// Words suggested for `level`; empty until a level is set.
pub fn recommended_words(level: CefrLevel) -> &'static [RecommendedWord] {
    match level {
        CefrLevel::A1 => A1,
        CefrLevel::A2 => A2,
        CefrLevel::B1 => B1,
        CefrLevel::B2 => B2,
        CefrLevel::C1 => C1,
        CefrLevel::C2 => C2,
        CefrLevel::NotSet => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_level_has_ten_words() {
        for level in CefrLevel::all() {
            assert_eq!(recommended_words(level).len(), 10, "level {level}");
        }
        assert!(recommended_words(CefrLevel::NotSet).is_empty());
    }

    #[test]
    fn test_words_within_level_are_unique() {
        for level in CefrLevel::all() {
            let words = recommended_words(level);
            for (i, w) in words.iter().enumerate() {
                assert!(!words[i + 1..].iter().any(|o| o.word == w.word));
            }
        }
    }
}
