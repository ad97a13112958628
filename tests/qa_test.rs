mod helpers;

use debrief::config::QaConfig;
use debrief::meeting::validate::ValidationError;
use debrief::meeting::{store, ConversationTurn, QaError, QuestionAnswerer};
use helpers::{answer, test_db, text, window, Reply, ScriptedModel, SHIP_FRIDAY_TRANSCRIPT};

fn qa(model: std::sync::Arc<ScriptedModel>) -> QuestionAnswerer {
    QuestionAnswerer::new(model, &QaConfig::default())
}

#[tokio::test]
async fn bob_commitment_scenario() {
    let conn = test_db();
    let id = store::save_meeting(&conn, "Friday release", SHIP_FRIDAY_TRANSCRIPT, None).unwrap();
    let transcript = store::load_transcript(&conn, id).unwrap().unwrap();

    let model = ScriptedModel::new([answer("Bob committed to writing the release notes.")]);
    let qa = qa(model.clone());
    let mut w = window(3);

    let record = qa
        .ask("What did Bob commit to?", &transcript, &mut w)
        .await
        .unwrap();

    assert!(!record.answer.is_empty());
    assert!(!record.answer.contains('{') && !record.answer.contains('}'));
    assert_eq!(w.len(), 1);

    let request = &model.requests()[0];
    assert_eq!(request.prompt, "What did Bob commit to?");
    let system = request.system.as_deref().unwrap();
    assert!(system.contains(SHIP_FRIDAY_TRANSCRIPT));
}

#[tokio::test]
async fn five_turns_keep_last_three_in_order() {
    let replies = (1..=5).map(|n| answer(&format!("answer {n}")));
    let model = ScriptedModel::new(replies);
    let qa = qa(model);
    let mut w = window(3);

    for n in 1..=5 {
        qa.ask(&format!("question {n}"), SHIP_FRIDAY_TRANSCRIPT, &mut w)
            .await
            .unwrap();
    }

    let kept: Vec<ConversationTurn> = w.iter().cloned().collect();
    assert_eq!(
        kept,
        vec![
            ConversationTurn::new("question 3", "answer 3"),
            ConversationTurn::new("question 4", "answer 4"),
            ConversationTurn::new("question 5", "answer 5"),
        ]
    );
}

#[tokio::test]
async fn history_reaches_the_model() {
    let model = ScriptedModel::new([answer("Friday."), answer("Bob.")]);
    let qa = qa(model.clone());
    let mut w = window(3);

    qa.ask("When do we ship?", SHIP_FRIDAY_TRANSCRIPT, &mut w).await.unwrap();
    qa.ask("Who writes the notes?", SHIP_FRIDAY_TRANSCRIPT, &mut w).await.unwrap();

    let requests = model.requests();
    let first = requests[0].system.as_deref().unwrap();
    let second = requests[1].system.as_deref().unwrap();
    assert!(!first.contains("When do we ship?"));
    assert!(second.contains("Question: When do we ship?\nAnswer: Friday."));
}

#[tokio::test]
async fn evicted_turns_leave_the_prompt() {
    let replies = (1..=5).map(|n| answer(&format!("answer {n}")));
    let model = ScriptedModel::new(replies);
    let qa = qa(model.clone());
    let mut w = window(3);

    for n in 1..=5 {
        qa.ask(&format!("question {n}"), SHIP_FRIDAY_TRANSCRIPT, &mut w)
            .await
            .unwrap();
    }

    // the fifth request saw turns 2..=4
    let last = model.requests()[4].system.clone().unwrap();
    assert!(!last.contains("question 1"));
    assert!(last.contains("question 2"));
    assert!(last.contains("question 4"));
}

#[tokio::test]
async fn failed_turn_leaves_window_unchanged() {
    let model = ScriptedModel::new([
        answer("Friday."),
        text("Sure! Bob is writing the notes."),
    ]);
    let qa = qa(model);
    let mut w = window(3);

    qa.ask("When do we ship?", SHIP_FRIDAY_TRANSCRIPT, &mut w).await.unwrap();
    let before: Vec<_> = w.iter().cloned().collect();

    let err = qa
        .ask("Who writes the notes?", SHIP_FRIDAY_TRANSCRIPT, &mut w)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        QaError::Invalid {
            source: ValidationError::Syntax(_),
            ..
        }
    ));
    let after: Vec<_> = w.iter().cloned().collect();
    assert_eq!(before, after);
}

#[tokio::test]
async fn json_inside_answer_is_rejected() {
    let model = ScriptedModel::new([answer(r#"{"speaker": "Bob"}"#)]);
    let qa = qa(model);
    let mut w = window(3);

    let err = qa
        .ask("Who?", SHIP_FRIDAY_TRANSCRIPT, &mut w)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        QaError::Invalid {
            source: ValidationError::Markup,
            ..
        }
    ));
    assert!(w.is_empty());
}

#[tokio::test]
async fn model_failure_leaves_window_unchanged() {
    let model = ScriptedModel::new([Reply::Timeout]);
    let qa = qa(model);
    let mut w = window(3);

    let err = qa.ask("Who?", SHIP_FRIDAY_TRANSCRIPT, &mut w).await.unwrap_err();

    assert!(matches!(err, QaError::Model { attempts: 1, .. }));
    assert!(w.is_empty());
}

#[tokio::test]
async fn empty_question_is_rejected_without_model_call() {
    let model = ScriptedModel::silent();
    let qa = qa(model.clone());
    let mut w = window(3);

    let err = qa.ask("   ", SHIP_FRIDAY_TRANSCRIPT, &mut w).await.unwrap_err();

    assert!(matches!(err, QaError::EmptyQuestion));
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn configured_retries_apply_to_answers() {
    let model = ScriptedModel::new([text("Friday"), answer("Friday.")]);
    let config = QaConfig {
        max_attempts: 2,
        ..Default::default()
    };
    let qa = QuestionAnswerer::new(model.clone(), &config);
    let mut w = window(3);

    let record = qa.ask("When?", SHIP_FRIDAY_TRANSCRIPT, &mut w).await.unwrap();

    assert_eq!(record.answer, "Friday.");
    assert_eq!(model.calls(), 2);
    assert_eq!(w.len(), 1);
}
