use std::collections::HashSet;
use std::sync::Arc;

use services::{
    AdvanceOutcome, Clock, QuizLoopService, SessionError, SessionState, SubmitOutcome,
};
use storage::{InMemoryRepository, StorageError, VerbRecord, VerbRepository};
use verbs_core::model::{QuizSettings, Verb};
use verbs_core::time::fixed_now;
use verbs_core::{PoolError, Verdict};

fn ten_verbs() -> InMemoryRepository {
    InMemoryRepository::from_records(vec![
        VerbRecord::new("go", "went", "gone"),
        VerbRecord::new("be", "was/were", "been"),
        VerbRecord::new("put", "put", "put"),
        VerbRecord::new("see", "saw", "seen"),
        VerbRecord::new("take", "took", "taken"),
        VerbRecord::new("get", "got", "got/gotten"),
        VerbRecord::new("eat", "ate", "eaten"),
        VerbRecord::new("swim", "swam", "swum"),
        VerbRecord::new("fly", "flew", "flown"),
        VerbRecord::new("dream", "dreamt/dreamed", "dreamt/dreamed"),
    ])
    .unwrap()
}

fn first_forms(verb: &Verb) -> (String, String) {
    (
        verb.preterit().iter().next().unwrap().to_uppercase(),
        format!("  {}  ", verb.participle().iter().next().unwrap()),
    )
}

#[tokio::test]
async fn ten_verb_dictionary_is_drained_exactly() {
    let loop_svc = QuizLoopService::new(Clock::fixed(fixed_now()), Arc::new(ten_verbs()))
        .with_seed(Some(2024));
    let mut session = loop_svc.load_session().await.unwrap();
    assert_eq!(session.question_limit(), 10);

    session.start().unwrap();
    let mut outcome = None;
    while outcome.is_none() {
        let (p, pp) = first_forms(session.current_verb().unwrap());
        assert!(matches!(session.submit(&p, &pp).unwrap(), SubmitOutcome::Graded(_)));
        if let AdvanceOutcome::Finished(summary) = session.advance().unwrap() {
            outcome = Some(summary);
        }
    }

    let summary = outcome.unwrap();
    assert_eq!(session.state(), SessionState::Finished);
    assert_eq!(session.remaining_verbs(), 0);
    assert_eq!(session.attempts().len(), 10);
    assert_eq!(summary.score(), 20);
    assert_eq!(summary.verdict(), Verdict::Perfect);
    assert_eq!(summary.correct(), 10);
    assert_eq!(summary.started_at(), fixed_now());

    let bases: HashSet<_> = session.attempts().iter().map(|a| a.verb().id()).collect();
    assert_eq!(bases.len(), 10);

    // no 11th draw: advance is rejected once finished
    assert!(matches!(
        session.advance(),
        Err(SessionError::UnexpectedEvent { .. })
    ));
}

#[tokio::test]
async fn same_seed_replays_the_same_questions() {
    let repo: Arc<dyn VerbRepository> = Arc::new(ten_verbs());
    let svc = QuizLoopService::new(Clock::default(), repo).with_seed(Some(9));

    let mut a = svc.load_session().await.unwrap();
    let mut b = svc.load_session().await.unwrap();
    assert_eq!(a.start().unwrap().id(), b.start().unwrap().id());
}

#[tokio::test]
async fn undersized_dictionary_aborts_startup() {
    let repo = InMemoryRepository::from_records(vec![VerbRecord::new("go", "went", "gone")]).unwrap();
    let err = QuizLoopService::new(Clock::default(), Arc::new(repo))
        .load_session()
        .await
        .unwrap_err();
    assert!(err.is_configuration());
    assert!(matches!(
        err,
        SessionError::DictionaryTooSmall {
            available: 1,
            required: 10
        }
    ));
}

#[tokio::test]
async fn empty_dictionary_aborts_startup() {
    let err = QuizLoopService::new(Clock::default(), Arc::new(InMemoryRepository::new()))
        .with_settings(QuizSettings::new(1).unwrap())
        .load_session()
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::Pool(PoolError::EmptyDictionary)));
}

struct BrokenSource;

#[async_trait::async_trait]
impl VerbRepository for BrokenSource {
    async fn load_verbs(&self) -> Result<Vec<Verb>, StorageError> {
        Err(StorageError::Connection("offline".into()))
    }
}

#[tokio::test]
async fn storage_failure_is_propagated() {
    let err = QuizLoopService::new(Clock::default(), Arc::new(BrokenSource))
        .load_session()
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::Storage(StorageError::Connection(_))));
}
