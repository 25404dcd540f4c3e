//! Static payloads for legacy task types and for language generation failures.

use crate::domain::{GeneratedContent, Solution, TaskContent, TaskType};
use crate::lexicon::RelationKind;

const LANGUAGE_QUESTION: &str = "Was passt nicht?";

pub fn math_stream() -> GeneratedContent {
  GeneratedContent {
    question: "Math Stream".into(),
    content: TaskContent::MathStream { start_value: 10, default_speed_ms: 2000, default_ops: vec!["+".into()] },
    solution: Solution::Number(0),
  }
}

pub fn synonym() -> GeneratedContent {
  GeneratedContent {
    question: LANGUAGE_QUESTION.into(),
    content: TaskContent::Synonym {
      word: "Big".into(),
      synonyms: ["Large", "Huge", "Giant", "Massive"].map(String::from).to_vec(),
      hint: "Opposite of small".into(),
    },
    solution: Solution::None,
  }
}

pub fn rhyme() -> GeneratedContent {
  GeneratedContent {
    question: LANGUAGE_QUESTION.into(),
    content: TaskContent::Rhyme {
      word: "Cat".into(),
      rhymes: ["Bat", "Hat", "Mat", "Rat", "Sat"].map(String::from).to_vec(),
      hint: "Animal".into(),
    },
    solution: Solution::None,
  }
}

pub fn sentence() -> GeneratedContent {
  GeneratedContent {
    question: LANGUAGE_QUESTION.into(),
    content: TaskContent::Sentence {
      word1: "Sun".into(),
      word2: "Ice".into(),
      example_sentence: "The sun melted the ice.".into(),
    },
    solution: Solution::None,
  }
}

pub fn placeholder() -> GeneratedContent {
  GeneratedContent { question: "Task".into(), content: TaskContent::Placeholder, solution: Solution::None }
}

/// Fixed odd-one-out / connect task served when the lexicon cannot produce one.
pub fn language(task_type: TaskType) -> GeneratedContent {
  match task_type {
    TaskType::LangConnect => GeneratedContent {
      question: "Verbinde Wörter".into(),
      content: TaskContent::Connect {
        mode: RelationKind::Antonym,
        target: "groß".into(),
        options: ["schnell", "klein", "laut"].map(String::from).to_vec(),
        correct_index: 1,
        answer: "klein".into(),
      },
      solution: Solution::Index(1),
    },
    TaskType::LangOddOneOut => GeneratedContent {
      question: LANGUAGE_QUESTION.into(),
      content: TaskContent::OddOneOut {
        options: ["Hund", "Katze", "Apfel"].map(String::from).to_vec(),
        odd_index: 2,
        hint: "Eines ist FRUITS, die anderen sind ANIMALS.".into(),
      },
      solution: Solution::Index(2),
    },
    _ => placeholder(),
  }
}
