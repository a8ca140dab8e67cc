//! Record-replay round-trip integration test.
//!
//! 1. Onboard two employees against a live file store while recording the
//!    clock, id generator, store and notifier ports.
//! 2. Replay the per-port cassettes and onboard the same people again.
//! 3. Assert identical outcomes, twice, without touching the data directory.

use std::path::Path;

use chrono::NaiveDate;

use hrms::cassette::config::CassetteConfig;
use hrms::cassette::session::RecordingSession;
use hrms::config::Config;
use hrms::context::ServiceContext;
use hrms::employee::{NewEmployee, Role};
use hrms::onboarding::{Onboarded, Onboarding, OnboardingSettings};

fn new_hire(first: &str, last: &str) -> NewEmployee {
    NewEmployee {
        organization: "TechCorp".into(),
        first_name: first.into(),
        last_name: last.into(),
        email: format!("{}@techcorp.example", first.to_lowercase()),
        joined_on: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        role: Role::Employee,
    }
}

async fn onboard_both(ctx: &ServiceContext) -> Vec<Onboarded> {
    let onboarding = Onboarding::new(ctx, OnboardingSettings::default());
    let mut outcomes = Vec::new();
    for (first, last) in [("Ava", "Lee"), ("Ava", "Lee")] {
        outcomes.push(onboarding.onboard(Role::Hr, new_hire(first, last)).await.unwrap());
    }
    outcomes
}

fn per_port(dir: &Path) -> CassetteConfig {
    CassetteConfig {
        clock: Some(dir.join("clock.cassette.yaml")),
        id_gen: Some(dir.join("id_gen.cassette.yaml")),
        store: Some(dir.join("store.cassette.yaml")),
        notifier: Some(dir.join("notifier.cassette.yaml")),
    }
}

#[tokio::test]
async fn record_then_replay_produces_identical_outcomes() {
    let data = tempfile::tempdir().unwrap();
    let cassettes = tempfile::tempdir().unwrap();
    let config = Config { data_dir: data.path().to_path_buf(), ..Config::default() };

    // --- Phase 1: record ---
    let session = RecordingSession::new(cassettes.path()).unwrap();
    let recorded = {
        let ctx = ServiceContext::recording(&config, &session);
        onboard_both(&ctx).await
    };
    let cassette_dir = session.finish().unwrap();

    let ids: Vec<&str> = recorded.iter().map(|o| o.login_id.as_str()).collect();
    assert_eq!(ids, vec!["EMPTEAVLE20240001", "EMPTEAVLE20240002"]);

    let notifier_yaml = std::fs::read_to_string(cassette_dir.join("notifier.cassette.yaml")).unwrap();
    assert!(notifier_yaml.contains("[redacted]"));

    // --- Phase 2: replay against an emptied data directory ---
    std::fs::remove_dir_all(data.path().join("employees")).unwrap();
    let replayed = onboard_both(&ServiceContext::replaying_from(&per_port(&cassette_dir)).unwrap()).await;

    for (r, p) in recorded.iter().zip(&replayed) {
        assert_eq!(r.login_id, p.login_id);
        assert_eq!(r.record.id, p.record.id);
        assert_eq!(r.record.created_at, p.record.created_at);
        assert_eq!(r.notified, p.notified);
    }
    assert!(!data.path().join("employees").exists(), "replay must not write");

    // --- Phase 3: determinism ---
    let again = onboard_both(&ServiceContext::replaying_from(&per_port(&cassette_dir)).unwrap()).await;
    let replayed_ids: Vec<_> = replayed.iter().map(|o| &o.login_id).collect();
    let again_ids: Vec<_> = again.iter().map(|o| &o.login_id).collect();
    assert_eq!(replayed_ids, again_ids);
}
