//! Built-in exercises used when no catalog file is configured.

use quiz_core::model::{DEFAULT_CATEGORY, ExerciseRecord, LevelId};

use crate::catalog::ExerciseCatalog;

type Row = (&'static str, &'static str, [&'static str; 4], &'static str);

const A1: &[Row] = &[
    ("He ___ to school every day.", "Present Simple", ["runs", "run", "running", "ran"], "runs"),
    ("I ___ a student.", "Verb To Be", ["am", "is", "are", "be"], "am"),
    ("They ___ from Brazil.", "Verb To Be", ["are", "is", "am", "be"], "are"),
    ("She ___ coffee in the morning.", "Present Simple", ["drinks", "drink", "drinking", "drank"], "drinks"),
    ("We ___ TV at night.", "Present Simple", ["watch", "watches", "watching", "watched"], "watch"),
    ("This is ___ apple.", "Articles", ["an", "a", "the", "some"], "an"),
    ("I have ___ dog.", "Articles", ["a", "an", "any", "much"], "a"),
    ("___ you like pizza?", "Present Simple Questions", ["Do", "Does", "Are", "Is"], "Do"),
    ("___ he play tennis?", "Present Simple Questions", ["Does", "Do", "Is", "Are"], "Does"),
    ("My sister ___ not like fish.", "Present Simple Negative", ["does", "do", "is", "are"], "does"),
    ("There ___ two cats in the garden.", "There Is / There Are", ["are", "is", "be", "am"], "are"),
    ("There ___ a book on the table.", "There Is / There Are", ["is", "are", "be", "were"], "is"),
    ("This is ___ car. It belongs to me.", "Possessive Adjectives", ["my", "me", "I", "mine"], "my"),
    ("They love ___ children.", "Possessive Adjectives", ["their", "they", "them", "theirs"], "their"),
    ("I can ___ English.", "Modal Can", ["speak", "speaks", "speaking", "to speak"], "speak"),
    ("She ___ swim very well.", "Modal Can", ["can", "cans", "to can", "canning"], "can"),
    ("The keys are ___ the table.", "Prepositions of Place", ["on", "at", "to", "of"], "on"),
    ("I was born ___ 1999.", "Prepositions of Time", ["in", "on", "at", "by"], "in"),
    ("Look! The baby ___ sleeping.", "Present Continuous", ["is", "are", "am", "be"], "is"),
    ("We ___ studying right now.", "Present Continuous", ["are", "is", "am", "be"], "are"),
];

const A2: &[Row] = &[
    ("Yesterday I ___ to the cinema.", "Past Simple", ["went", "go", "gone", "going"], "went"),
    ("She ___ her homework last night.", "Past Simple", ["did", "does", "done", "doing"], "did"),
    ("My brother is ___ than me.", "Comparatives", ["taller", "tallest", "more tall", "tall"], "taller"),
    ("This is the ___ day of my life.", "Superlatives", ["best", "better", "good", "most good"], "best"),
    ("I ___ visit my grandmother tomorrow.", "Future Going To", ["am going to", "going to", "will to", "go to"], "am going to"),
    ("While I ___ dinner, the phone rang.", "Past Continuous", ["was cooking", "cooked", "am cooking", "cook"], "was cooking"),
];

const B1: &[Row] = &[
    ("I ___ in London since 2015.", "Present Perfect", ["have lived", "lived", "am living", "live"], "have lived"),
    ("Have you ever ___ sushi?", "Present Perfect", ["eaten", "ate", "eat", "eating"], "eaten"),
    ("If it rains, we ___ at home.", "First Conditional", ["will stay", "stayed", "would stay", "stay"], "will stay"),
    ("The letter ___ by my father.", "Passive Voice", ["was written", "wrote", "is writing", "written"], "was written"),
    ("You ___ wear a seatbelt. It's the law.", "Modal Must", ["must", "might", "could", "would"], "must"),
];

const B2: &[Row] = &[
    ("If I ___ known, I would have come.", "Third Conditional", ["had", "have", "would", "did"], "had"),
    ("She said that she ___ tired.", "Reported Speech", ["was", "is", "has been", "be"], "was"),
    ("By next year, I ___ my degree.", "Future Perfect", ["will have finished", "will finish", "finished", "have finished"], "will have finished"),
];

const TIPS: &[(&str, &str)] = &[
    ("Present Simple", "Use the base verb for habits and facts; add -s or -es with he, she, it."),
    ("Verb To Be", "I am, you/we/they are, he/she/it is."),
    ("Articles", "Use 'an' before vowel sounds and 'a' before consonant sounds."),
    ("Present Simple Questions", "Start with 'do', or 'does' for he/she/it, then the base verb."),
    ("Present Simple Negative", "Use 'do not' or 'does not' followed by the base verb."),
    ("There Is / There Are", "'There is' goes with singular nouns, 'there are' with plural nouns."),
    ("Possessive Adjectives", "my, your, his, her, its, our, their always come before a noun."),
    ("Modal Can", "'Can' never changes form and is followed by the base verb without 'to'."),
    ("Prepositions of Place", "'on' for surfaces, 'in' for enclosed spaces, 'at' for points."),
    ("Prepositions of Time", "'in' for months and years, 'on' for days and dates, 'at' for clock times."),
    ("Present Continuous", "am/is/are + verb-ing for actions happening now."),
    ("Past Simple", "Regular verbs add -ed; irregular verbs have their own past form."),
    ("Comparatives", "Short adjectives add -er; long adjectives use 'more'."),
    ("Superlatives", "Use 'the' + adjective-est, or 'the most' + long adjective."),
    ("Future Going To", "am/is/are going to + base verb for plans and intentions."),
    ("Past Continuous", "was/were + verb-ing for an action in progress in the past."),
    ("Present Perfect", "have/has + past participle links the past to the present."),
    ("First Conditional", "If + present simple, will + base verb for real future situations."),
    ("Passive Voice", "Form of 'be' + past participle when the action matters more than the doer."),
    ("Modal Must", "'Must' expresses obligation and is followed by the base verb."),
    ("Third Conditional", "If + past perfect, would have + past participle for unreal past situations."),
    ("Reported Speech", "Move the tense one step back: 'is' becomes 'was', 'will' becomes 'would'."),
];

/// Sample catalog with levels A1 through B2 under [`DEFAULT_CATEGORY`].
#[must_use]
pub fn sample_catalog() -> ExerciseCatalog {
    let mut catalog = ExerciseCatalog::new();
    for (level, rows) in [("A1", A1), ("A2", A2), ("B1", B1), ("B2", B2)] {
        catalog.insert_exercises(LevelId::new(level), DEFAULT_CATEGORY, rows.iter().map(to_record));
    }
    for (grammar_type, tip) in TIPS {
        catalog.grammar_tips.insert(*grammar_type, *tip);
    }
    catalog
}

fn to_record(row: &Row) -> ExerciseRecord {
    let (prompt, grammar_type, options, correct_answer) = *row;
    ExerciseRecord::new(prompt, grammar_type, options, correct_answer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_catalog_is_well_formed() {
        let catalog = sample_catalog();
        assert!(catalog.audit().is_empty());
        assert_eq!(
            catalog.level_ids(),
            ["A1", "A2", "B1", "B2"].map(LevelId::new).to_vec()
        );
    }

    #[test]
    fn a1_holds_more_than_one_batch() {
        let catalog = sample_catalog();
        let a1 = catalog
            .exercises(&LevelId::new("A1"), DEFAULT_CATEGORY)
            .unwrap();
        assert_eq!(a1.len(), 20);
    }
}
