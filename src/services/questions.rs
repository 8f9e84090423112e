//! Question Bank Module
//!
//! Static per-type question pools. Selection prefers questions the user
//! has not completed; once a user has seen every question for a type the
//! whole pool becomes eligible again.

use serde::{Deserialize, Serialize};

use crate::models::AssessmentType;

// == Question ==
/// One assessment question. Writing questions carry a single prompt with
/// word/time limits; speaking questions carry the three-part script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub question_id: String,
    pub assessment_type: AssessmentType,
    pub task: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub parts: Vec<SpeakingPart>,
}

/// One part of a speaking assessment script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeakingPart {
    pub part: u8,
    pub topic: String,
    pub questions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preparation_secs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaking_secs: Option<u32>,
}

fn writing_question(
    question_id: &str,
    kind: AssessmentType,
    task: &str,
    prompt: &str,
    word_limit: u32,
    time_limit_minutes: u32,
) -> Question {
    Question {
        question_id: question_id.to_string(),
        assessment_type: kind,
        task: task.to_string(),
        prompt: prompt.to_string(),
        word_limit: Some(word_limit),
        time_limit_minutes: Some(time_limit_minutes),
        parts: Vec::new(),
    }
}

fn speaking_question(question_id: &str, kind: AssessmentType, cue: &str, parts: Vec<SpeakingPart>) -> Question {
    Question {
        question_id: question_id.to_string(),
        assessment_type: kind,
        task: "Three-part interview".to_string(),
        prompt: cue.to_string(),
        word_limit: None,
        time_limit_minutes: None,
        parts,
    }
}

fn interview(part1: [&str; 2], cue: &str, part3: [&str; 2]) -> Vec<SpeakingPart> {
    vec![
        SpeakingPart {
            part: 1,
            topic: "Introduction and Interview".to_string(),
            questions: part1.iter().map(|q| q.to_string()).collect(),
            preparation_secs: None,
            speaking_secs: None,
        },
        SpeakingPart {
            part: 2,
            topic: "Individual Long Turn".to_string(),
            questions: vec![cue.to_string()],
            preparation_secs: Some(60),
            speaking_secs: Some(120),
        },
        SpeakingPart {
            part: 3,
            topic: "Two-way Discussion".to_string(),
            questions: part3.iter().map(|q| q.to_string()).collect(),
            preparation_secs: None,
            speaking_secs: None,
        },
    ]
}

// == Bank ==
/// Full question pool for one assessment type.
pub fn question_bank(kind: AssessmentType) -> Vec<Question> {
    match kind {
        AssessmentType::AcademicWriting => vec![
            writing_question(
                "aw_task2_001",
                kind,
                "Task 2",
                "Some people believe that universities should require every student to take a \
                 variety of courses outside their field of study. Others believe students should \
                 only take courses that prepare them for jobs in their chosen fields. Discuss \
                 both views and give your own opinion.",
                250,
                40,
            ),
            writing_question(
                "aw_task2_002",
                kind,
                "Task 2",
                "Many governments think that economic progress is their most important goal. \
                 Some people, however, think that other types of progress are equally important \
                 for a country. Discuss both these views and give your own opinion.",
                250,
                40,
            ),
            writing_question(
                "aw_task2_003",
                kind,
                "Task 2",
                "In some countries, young people are encouraged to work or travel for a year \
                 between finishing high school and starting university studies. Discuss the \
                 advantages and disadvantages for young people who decide to do this.",
                250,
                40,
            ),
            writing_question(
                "aw_task2_004",
                kind,
                "Task 2",
                "Many cities are experiencing increasing pressure from tourism. Discuss the \
                 potential benefits and drawbacks of mass tourism in urban areas, and suggest \
                 ways in which cities can manage tourism more sustainably.",
                250,
                40,
            ),
        ],
        AssessmentType::GeneralWriting => vec![
            writing_question(
                "gw_task1_001",
                kind,
                "Task 1",
                "You recently bought a piece of equipment for your kitchen but it did not work. \
                 You phoned the shop but no action was taken. Write a letter to the shop manager: \
                 describe the problem, explain what happened when you phoned, and say what you \
                 would like the manager to do.",
                150,
                20,
            ),
            writing_question(
                "gw_task1_002",
                kind,
                "Task 1",
                "You work for an international company and would like to spend six months \
                 working in its head office in another country. Write a letter to your manager: \
                 explain why, say how your work could be done while you are away, and ask for \
                 help in arranging it.",
                150,
                20,
            ),
            writing_question(
                "gw_task2_003",
                kind,
                "Task 2",
                "Many companies now allow their employees to work from home some or all of the \
                 time. Do you think the advantages of remote work outweigh the disadvantages?",
                250,
                40,
            ),
            writing_question(
                "gw_task2_004",
                kind,
                "Task 2",
                "Urban areas face increasing traffic problems. Some think building more roads \
                 is the answer, while others favour improving public transport. Which should be \
                 the priority?",
                250,
                40,
            ),
        ],
        AssessmentType::AcademicSpeaking => vec![
            speaking_question(
                "as_complete_001",
                kind,
                "Describe a place you have visited that had a significant impact on you. You \
                 should say where it is, when you went there, what you did there, and explain \
                 why it had such an impact on you.",
                interview(
                    [
                        "Tell me about your favourite hobby and why you enjoy it.",
                        "Tell me about your job. What responsibilities do you have?",
                    ],
                    "Describe a place you have visited that had a significant impact on you.",
                    [
                        "Do you think travel is an important part of education? Why or why not?",
                        "What changes do you think will happen in education in the future?",
                    ],
                ),
            ),
            speaking_question(
                "as_complete_002",
                kind,
                "Describe a person who has had a significant influence on your life. You should \
                 say who this person is, how you know them, what they do, and explain why they \
                 have influenced you so much.",
                interview(
                    [
                        "What do you like or dislike about your studies?",
                        "Would you prefer to work in a large company or a small company? Why?",
                    ],
                    "Describe a person who has had a significant influence on your life.",
                    [
                        "Do you think students should be able to choose what they study at school?",
                        "How important is it for people to continue learning throughout their lives?",
                    ],
                ),
            ),
            speaking_question(
                "as_complete_003",
                kind,
                "Describe a teacher who has influenced you. You should say when you met them, \
                 what subject they taught, what was special about them, and explain how they \
                 influenced your life.",
                interview(
                    [
                        "Can you describe the place where you live?",
                        "What kind of accommodation do you live in?",
                    ],
                    "Describe a teacher who has influenced you.",
                    [
                        "What factors should people consider when choosing a career?",
                        "Is it better to have one job for life or to change jobs regularly?",
                    ],
                ),
            ),
        ],
        AssessmentType::GeneralSpeaking => vec![
            speaking_question(
                "gs_complete_001",
                kind,
                "Describe a historic building you have visited. You should say where it is, \
                 when you visited it, what it looks like, and explain why you visited it.",
                interview(
                    [
                        "What activities do you enjoy doing in your free time?",
                        "Do you prefer indoor or outdoor activities? Why?",
                    ],
                    "Describe a historic building you have visited.",
                    [
                        "How might technology change the way we live in the future?",
                        "Do social media platforms bring people together or push them apart?",
                    ],
                ),
            ),
            speaking_question(
                "gs_complete_002",
                kind,
                "Describe a place in your country that you would recommend someone visit. You \
                 should say where it is, what people can do there, when is the best time to \
                 visit, and explain why you would recommend it.",
                interview(
                    [
                        "How important is it to have hobbies?",
                        "How often do you use computers or technology in your daily life?",
                    ],
                    "Describe a place in your country that you would recommend someone visit.",
                    [
                        "Should there be more regulation of technology and the internet?",
                        "How has family life changed in your country in recent decades?",
                    ],
                ),
            ),
            speaking_question(
                "gs_complete_003",
                kind,
                "Describe an important object in your life. You should say what it is, how long \
                 you have had it, where you got it from, and explain why it is important to you.",
                interview(
                    [
                        "What impact does technology have on your work or studies?",
                        "Do you think people rely too much on technology nowadays?",
                    ],
                    "Describe an important object in your life.",
                    [
                        "What role should governments play in healthcare and social services?",
                        "Is it better to live in a city or in the countryside? Why?",
                    ],
                ),
            ),
        ],
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_type_has_questions() {
        for kind in AssessmentType::ALL {
            let bank = question_bank(kind);
            assert!(!bank.is_empty(), "{kind} has an empty bank");
            for question in &bank {
                assert_eq!(question.assessment_type, kind);
                assert!(!question.prompt.is_empty());
            }
        }
    }

    #[test]
    fn test_question_ids_unique_per_type() {
        for kind in AssessmentType::ALL {
            let bank = question_bank(kind);
            let ids: HashSet<&str> = bank.iter().map(|q| q.question_id.as_str()).collect();
            assert_eq!(ids.len(), bank.len());
        }
    }

    #[test]
    fn test_writing_questions_carry_limits() {
        for question in question_bank(AssessmentType::AcademicWriting) {
            assert!(question.word_limit.is_some());
            assert!(question.time_limit_minutes.is_some());
            assert!(question.parts.is_empty());
        }
    }

    #[test]
    fn test_speaking_questions_have_three_parts() {
        for question in question_bank(AssessmentType::GeneralSpeaking) {
            assert_eq!(question.parts.len(), 3);
            let part2 = &question.parts[1];
            assert_eq!(part2.part, 2);
            assert_eq!(part2.preparation_secs, Some(60));
            assert_eq!(part2.speaking_secs, Some(120));
        }
    }
}
