//! Gesture-driven herb learning and quiz
//!
//! Learning mode pages through random herbs; after enough of them a test of
//! generated multiple-choice questions starts. The test state is a set of
//! orthogonal flags rather than a single phase: `in_test`,
//! `current_question`, `selected_answer` and `test_completed`.

use glam::DVec2;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::geometry::Rect;
use super::herbs::{HERBS, Herb, HerbField};
use super::state::GameEvent;
use super::tick::TickInput;
use super::trigger::CooldownTrigger;
use crate::consts::*;
use crate::tracking::HandShape;

pub const NEXT_HERB_BUTTON: Rect = Rect::new(QUIZ_WIDTH - 180.0, QUIZ_HEIGHT - 250.0, 160.0, 50.0);
pub const DETAILS_BUTTON: Rect = Rect::new(QUIZ_WIDTH - 180.0, QUIZ_HEIGHT - 350.0, 160.0, 50.0);
/// "Next question" while testing, "Back to learning" once finished
pub const TEST_NAV_BUTTON: Rect = Rect::new(QUIZ_WIDTH / 2.0 - 80.0, QUIZ_HEIGHT - 100.0, 160.0, 50.0);

/// Rectangle of answer option `index`
pub fn option_rect(index: usize) -> Rect {
    Rect::new(QUIZ_WIDTH / 2.0 - 300.0, 300.0 + index as f64 * 70.0, 600.0, 50.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    /// Index into `HERBS`
    pub herb: usize,
    pub field: HerbField,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

impl Question {
    pub fn is_correct(&self, answer: usize) -> bool {
        answer == self.correct_index
    }
}

#[derive(Debug, Clone)]
pub struct QuizState {
    pub welcome: bool,
    pub current_herb: usize,
    pub show_info: bool,
    pub learned_count: u32,
    /// Distinct herbs seen, in first-seen order
    pub learned_herbs: Vec<usize>,
    pub in_test: bool,
    pub questions: Vec<Question>,
    pub current_question: usize,
    pub selected_answer: Option<usize>,
    pub test_score: u32,
    pub test_completed: bool,
    pub learn_trigger: CooldownTrigger,
    pub test_trigger: CooldownTrigger,
    pub last_shape: Option<HandShape>,
    rng: Pcg32,
}

impl QuizState {
    pub fn new(mut rng: Pcg32) -> Self {
        let current_herb = rng.random_range(0..HERBS.len());
        Self {
            welcome: true,
            current_herb,
            show_info: false,
            learned_count: 0,
            learned_herbs: Vec::new(),
            in_test: false,
            questions: Vec::new(),
            current_question: 0,
            selected_answer: None,
            test_score: 0,
            test_completed: false,
            learn_trigger: CooldownTrigger::new(LEARN_COOLDOWN_TICKS),
            test_trigger: CooldownTrigger::new(TEST_COOLDOWN_TICKS),
            last_shape: None,
            rng,
        }
    }

    pub fn herb(&self) -> &Herb {
        &HERBS[self.current_herb % HERBS.len()]
    }

    pub fn question(&self) -> Option<&Question> {
        if self.in_test && !self.test_completed {
            self.questions.get(self.current_question)
        } else {
            None
        }
    }

    pub fn tick(&mut self, input: &TickInput, events: &mut Vec<GameEvent>) {
        self.last_shape = input.shape;

        if self.welcome {
            self.learn_trigger.try_fire(false);
            self.test_trigger.try_fire(false);
            if input.click.is_some() || input.confirm {
                self.welcome = false;
                events.push(GameEvent::WelcomeDismissed);
            }
            return;
        }

        if let Some(click) = input.click {
            self.handle_click(click, events);
        }

        let shape = input.shape.unwrap_or(HandShape::Other);
        if self.in_test && !self.test_completed {
            self.learn_trigger.try_fire(false);
            let digit = match shape {
                HandShape::Digit(n @ 1..=4) if self.selected_answer.is_none() => Some(usize::from(n) - 1),
                _ => None,
            };
            let advance = shape == HandShape::OpenPalm && self.selected_answer.is_some();
            if self.test_trigger.try_fire(digit.is_some() || advance) {
                match digit {
                    Some(index) => self.select_answer(index, events),
                    None => self.next_question(events),
                }
            }
        } else if self.in_test {
            self.learn_trigger.try_fire(false);
            if self.test_trigger.try_fire(shape == HandShape::OpenPalm) {
                self.return_to_learning(events);
            }
        } else {
            self.test_trigger.try_fire(false);
            let toggle = shape == HandShape::Victory;
            let next = shape == HandShape::OpenPalm;
            if self.learn_trigger.try_fire(toggle || next) {
                if toggle {
                    self.toggle_info(events);
                } else {
                    self.next_herb(events);
                }
            }
        }
    }

    fn handle_click(&mut self, click: DVec2, events: &mut Vec<GameEvent>) {
        if self.in_test && !self.test_completed {
            let option_count = self.question().map_or(0, |q| q.options.len());
            if let Some(index) = (0..option_count).find(|i| option_rect(*i).contains(click)) {
                self.select_answer(index, events);
            } else if TEST_NAV_BUTTON.contains(click) {
                self.next_question(events);
            }
        } else if self.in_test {
            if TEST_NAV_BUTTON.contains(click) {
                self.return_to_learning(events);
            }
        } else if NEXT_HERB_BUTTON.contains(click) {
            self.next_herb(events);
        } else if DETAILS_BUTTON.contains(click) {
            self.toggle_info(events);
        }
    }

    /// Count the current herb as learned and show a random one
    pub fn next_herb(&mut self, events: &mut Vec<GameEvent>) {
        if !self.learned_herbs.contains(&self.current_herb) {
            self.learned_herbs.push(self.current_herb);
        }
        self.current_herb = self.rng.random_range(0..HERBS.len());
        self.show_info = false;
        self.learned_count += 1;
        events.push(GameEvent::HerbShown { index: self.current_herb });

        if self.learned_count >= LEARN_THRESHOLD && !self.in_test {
            self.start_test(events);
        }
    }

    pub fn toggle_info(&mut self, events: &mut Vec<GameEvent>) {
        self.show_info = !self.show_info;
        events.push(GameEvent::InfoToggled { visible: self.show_info });
    }

    fn start_test(&mut self, events: &mut Vec<GameEvent>) {
        self.questions = generate_questions(&mut self.rng, &self.learned_herbs, QUESTION_COUNT);
        self.in_test = true;
        self.current_question = 0;
        self.selected_answer = None;
        self.test_score = 0;
        self.test_completed = false;
        log::info!("Quiz test started with {} questions", self.questions.len());
        events.push(GameEvent::TestStarted {
            questions: self.questions.len(),
        });
    }

    /// Lock in an answer; ignored once the current question is answered
    pub fn select_answer(&mut self, index: usize, events: &mut Vec<GameEvent>) {
        if self.selected_answer.is_some() {
            return;
        }
        let Some(question) = self.question() else {
            return;
        };
        if index >= question.options.len() {
            return;
        }
        let correct = question.is_correct(index);
        self.selected_answer = Some(index);
        events.push(GameEvent::AnswerSelected { index, correct });
    }

    /// Score the locked answer and move on; requires an answer first
    pub fn next_question(&mut self, events: &mut Vec<GameEvent>) {
        let Some(answer) = self.selected_answer else {
            return;
        };
        if self.question().is_some_and(|q| q.is_correct(answer)) {
            self.test_score += 1;
        }
        self.current_question += 1;
        self.selected_answer = None;

        if self.current_question >= self.questions.len() {
            self.test_completed = true;
            log::info!("Quiz finished: {}/{}", self.test_score, self.questions.len());
            events.push(GameEvent::TestCompleted {
                score: self.test_score,
                total: self.questions.len(),
            });
        } else {
            events.push(GameEvent::QuestionAdvanced {
                index: self.current_question,
            });
        }
    }

    pub fn return_to_learning(&mut self, events: &mut Vec<GameEvent>) {
        self.in_test = false;
        self.test_completed = false;
        self.questions.clear();
        self.current_question = 0;
        self.selected_answer = None;
        self.learned_count = 0;
        self.show_info = false;
        events.push(GameEvent::ReturnedToLearning);
    }
}

/// Build `count` multiple-choice questions
///
/// Questions are drawn from the learned herbs once at least
/// `MIN_LEARNED_POOL` are known, otherwise from the whole catalog. Each has
/// the correct value plus up to three distinct distractors from other herbs,
/// shuffled.
pub fn generate_questions<R: Rng>(rng: &mut R, learned: &[usize], count: usize) -> Vec<Question> {
    let all: Vec<usize> = (0..HERBS.len()).collect();
    let pool = if learned.len() >= MIN_LEARNED_POOL { learned } else { &all[..] };

    let mut questions = Vec::with_capacity(count);
    for _ in 0..count {
        let (Some(&herb), Some(&field)) = (pool.choose(rng), HerbField::ALL.choose(rng)) else {
            break;
        };
        let correct = HERBS[herb].field(field);

        let mut distractors: Vec<&str> = Vec::new();
        for (i, other) in HERBS.iter().enumerate() {
            let value = other.field(field);
            if i != herb && value != correct && !distractors.contains(&value) {
                distractors.push(value);
            }
        }
        distractors.shuffle(rng);
        distractors.truncate(OPTION_COUNT - 1);

        let mut options: Vec<String> = distractors.into_iter().map(str::to_string).collect();
        options.push(correct.to_string());
        options.shuffle(rng);
        let correct_index = options.iter().position(|o| o == correct).unwrap_or(0);

        questions.push(Question {
            herb,
            field,
            prompt: format!("What is the {} of {}?", field.label(), HERBS[herb].name),
            options,
            correct_index,
        });
    }
    questions
}
