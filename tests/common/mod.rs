#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use pipeline_board::domain::{Card, SortDir, SortKey, Stage};
use pipeline_board::infrastructure::{
    BoardPayload, BoardQuery, BoardSummary, DealsRemote, RemoteError,
};
use pipeline_board::services::{BoardStore, DragReconciler, PersistenceGateway};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

pub fn stage(id: &str, name: &str, probability: i64, position: i64, won: bool) -> Stage {
    Stage {
        id: id.into(),
        name: name.into(),
        color: "#607d8b".into(),
        probability,
        position,
        won,
    }
}

pub fn deal(id: &str, company: &str, stage_id: &str, value: f64) -> Card {
    let created = Utc
        .with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
        .single()
        .expect("fixture timestamp");
    Card {
        id: id.into(),
        company: company.into(),
        contact: format!("sales@{}.example", company.to_lowercase()),
        value,
        stage_id: stage_id.into(),
        expected_close: None,
        stage_changed_at: None,
        created_at: created,
        updated_at: created,
        health_score: Some(0.72),
        at_risk: Some(false),
    }
}

/// Four-stage pipeline: lead → qualified → proposal → signed (terminal).
pub fn pipeline_stages() -> Vec<Stage> {
    vec![
        stage("lead", "Lead", 10, 1, false),
        stage("qualified", "Qualified", 35, 2, false),
        stage("proposal", "Proposal", 60, 3, false),
        stage("signed", "Signed", 100, 4, true),
    ]
}

pub fn pipeline_deals() -> Vec<Card> {
    vec![
        deal("d1", "Acme", "lead", 12_000.0),
        deal("d2", "Globex", "lead", 8_000.0),
        deal("d3", "Initech", "qualified", 30_000.0),
    ]
}

/// In-memory stand-in for the remote deal store. Applies committed writes
/// to its own state so a post-commit refresh returns the server's view of
/// the move, and sorts deals per the query like the real RPC does.
pub struct FakeRemote {
    state: Mutex<RemoteState>,
}

struct RemoteState {
    stages: Vec<Stage>,
    deals: Vec<Card>,
    fail_commits: bool,
    commit_delay: Option<Duration>,
    commits: Vec<(String, String)>,
    fetches: usize,
}

impl FakeRemote {
    pub fn new(stages: Vec<Stage>, deals: Vec<Card>) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(RemoteState {
                stages,
                deals,
                fail_commits: false,
                commit_delay: None,
                commits: Vec::new(),
                fetches: 0,
            }),
        })
    }

    pub fn set_fail_commits(&self, fail: bool) {
        self.state.lock().unwrap().fail_commits = fail;
    }

    pub fn set_commit_delay(&self, delay: Duration) {
        self.state.lock().unwrap().commit_delay = Some(delay);
    }

    pub fn set_deals(&self, deals: Vec<Card>) {
        self.state.lock().unwrap().deals = deals;
    }

    pub fn commits(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().commits.clone()
    }

    pub fn fetches(&self) -> usize {
        self.state.lock().unwrap().fetches
    }
}

#[async_trait]
impl DealsRemote for FakeRemote {
    async fn fetch_board(&self, query: &BoardQuery) -> Result<BoardPayload, RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.fetches += 1;

        let mut deals = state.deals.clone();
        match query.sort_by {
            SortKey::Value => deals.sort_by(|a, b| {
                a.value
                    .partial_cmp(&b.value)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
            SortKey::CreatedAt => deals.sort_by_key(|d| d.created_at),
            SortKey::Company => deals.sort_by(|a, b| a.company.cmp(&b.company)),
        }
        if query.sort_dir == SortDir::Desc {
            deals.reverse();
        }

        let total_count = deals.len() as i64;
        Ok(BoardPayload {
            stages: state.stages.clone(),
            deals,
            stage_metrics: Vec::new(),
            total_count,
            summary: BoardSummary::default(),
        })
    }

    async fn update_stage(&self, card_id: &str, stage_id: &str) -> Result<(), RemoteError> {
        let delay = self.state.lock().unwrap().commit_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.lock().unwrap();
        if state.fail_commits {
            return Err(RemoteError::Status(503, "stage update unavailable".into()));
        }

        state.commits.push((card_id.to_string(), stage_id.to_string()));
        if let Some(deal) = state.deals.iter_mut().find(|d| d.id == card_id) {
            deal.stage_id = stage_id.to_string();
            deal.stage_changed_at = Some(Utc::now());
        }
        Ok(())
    }
}

pub struct Harness {
    pub remote: Arc<FakeRemote>,
    pub store: BoardStore,
    pub recon: DragReconciler,
    pub gateway: PersistenceGateway,
}

pub async fn harness_with(stages: Vec<Stage>, deals: Vec<Card>) -> Harness {
    init_tracing();
    let remote = FakeRemote::new(stages, deals);
    let mut store = BoardStore::new(remote.clone(), BoardQuery::for_org("org-1"));
    store.refresh().await.expect("initial refresh");
    let mut recon = DragReconciler::new();
    recon.sync_from(&store);
    let gateway = PersistenceGateway::new(remote.clone(), Duration::from_millis(500));
    Harness {
        remote,
        store,
        recon,
        gateway,
    }
}

pub async fn pipeline_harness() -> Harness {
    harness_with(pipeline_stages(), pipeline_deals()).await
}

/// Minimal two-stage board: stage-a holds [d1, d2], stage-b is empty.
pub async fn two_stage_harness() -> Harness {
    let stages = vec![
        stage("stage-a", "Stage A", 20, 1, false),
        stage("stage-b", "Stage B", 50, 2, false),
    ];
    let deals = vec![
        deal("d1", "Acme", "stage-a", 2_000.0),
        deal("d2", "Globex", "stage-a", 1_000.0),
    ];
    harness_with(stages, deals).await
}

pub fn lane_ids(board: &pipeline_board::domain::Board, stage_id: &str) -> Vec<String> {
    board
        .lane(stage_id)
        .map(|lane| lane.to_vec())
        .unwrap_or_default()
}
