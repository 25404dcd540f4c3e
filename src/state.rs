//! Application state: engine config, lexicon, in-memory profile/task/session stores.
//!
//! This module owns:
//!   - profiles by user id (the "save path" source for clients)
//!   - issued tasks by task id, consumed exactly once by an outcome
//!   - sessions by session id
//!
//! Opening a session drops the user's earlier sessions and unanswered tasks,
//! and anything older than `retention_ms` from any user.
//!   - the analytics sink
//!
//! Profile updates for outcomes run under the profiles write lock, so outcomes
//! of one user are applied one after another and never against a stale copy.

use std::{collections::HashMap, sync::Arc};

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::adapter::{adapt, Decision};
use crate::analytics::{AnalyticsEvent, AnalyticsSink, TracingSink};
use crate::config::{load_engine_config_from_env, EngineConfig};
use crate::domain::{OutcomeRecord, TaskRecord, UserProfile};
use crate::error::EngineError;
use crate::evaluator::{evaluate, SessionContext};
use crate::lexicon::Lexicon;
use crate::migration::{reconcile, reconcile_blob};
use crate::selector::select_and_generate;
use crate::util::{generate_session_id, now_ms};

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub session_id: String,
    pub user_id: String,
    pub started_at: i64,
}

/// A task handed to a client and not yet answered.
#[derive(Clone, Debug)]
pub struct IssuedTask {
    pub user_id: String,
    pub task: TaskRecord,
    pub issued_at: i64,
}

/// What a client reports back after presenting a task.
#[derive(Clone, Debug)]
pub struct OutcomeReport {
    pub user_id: String,
    pub session_id: String,
    pub task_id: String,
    pub success: bool,
    pub time_spent_ms: u64,
    pub was_skipped: bool,
    pub start_time: Option<i64>,
}

#[derive(Clone, Debug)]
pub struct AppliedOutcome {
    pub outcome: OutcomeRecord,
    pub decision: Decision,
    pub profile: UserProfile,
}

#[derive(Clone)]
pub struct AppState {
    pub config: EngineConfig,
    pub lexicon: Arc<Lexicon>,
    pub profiles: Arc<RwLock<HashMap<String, UserProfile>>>,
    pub issued: Arc<RwLock<HashMap<String, IssuedTask>>>,
    pub sessions: Arc<RwLock<HashMap<String, Session>>>,
    pub analytics: Arc<dyn AnalyticsSink>,
}

impl AppState {
    /// Build state from env: load engine config, expand the lexicon.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let config = load_engine_config_from_env();
        Self::with_parts(config, Arc::new(TracingSink))
    }

    pub fn with_parts(config: EngineConfig, analytics: Arc<dyn AnalyticsSink>) -> Self {
        let weights: Vec<String> = config
            .category_weights
            .iter()
            .map(|w| format!("{:?}={:.2}", w.category, w.weight))
            .collect();
        info!(target: "flowscroll", weights = %weights.join(","), lookahead = config.lookahead, "Engine configured");

        Self {
            config,
            lexicon: Arc::new(Lexicon::builtin()),
            profiles: Arc::new(RwLock::new(HashMap::new())),
            issued: Arc::new(RwLock::new(HashMap::new())),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            analytics,
        }
    }

    /// Resolve the user's profile and open a session.
    ///
    /// A persisted blob wins over any server copy (it runs through migration
    /// first). It may arrive as a JSON object or as the serialized string a
    /// client keeps in storage. Without one, a known `user_id` resumes its
    /// profile and anything else starts a new profile.
    #[instrument(level = "info", skip(self, persisted), fields(has_blob = persisted.is_some()))]
    pub async fn start_session(&self, persisted: Option<&Value>, user_id: Option<&str>) -> (UserProfile, Session) {
        let profile = {
            let mut profiles = self.profiles.write().await;
            let profile = match (persisted, user_id) {
                (Some(Value::String(raw)), _) => reconcile_blob(raw),
                (Some(blob), _) => reconcile(blob),
                (None, Some(id)) if !id.is_empty() => profiles
                    .get(id)
                    .cloned()
                    .unwrap_or_else(|| UserProfile::new(id)),
                _ => UserProfile::fresh(),
            };
            profiles.insert(profile.user_id.clone(), profile.clone());
            profile
        };

        let started_at = now_ms();
        self.prune(&profile.user_id, started_at).await;
        let session = Session {
            session_id: generate_session_id(started_at),
            user_id: profile.user_id.clone(),
            started_at,
        };
        self.sessions
            .write()
            .await
            .insert(session.session_id.clone(), session.clone());

        info!(target: "flowscroll", user_id = %profile.user_id, session_id = %session.session_id, history = profile.history.len(), "Session started");
        (profile, session)
    }

    /// Forget `user_id`'s earlier sessions and lookahead tasks, plus every
    /// session or task older than the retention window.
    async fn prune(&self, user_id: &str, now: i64) {
        let cutoff = now.saturating_sub(self.config.retention_ms);

        let dropped_tasks = {
            let mut issued = self.issued.write().await;
            let before = issued.len();
            issued.retain(|_, t| t.user_id != user_id && t.issued_at >= cutoff);
            before - issued.len()
        };
        let dropped_sessions = {
            let mut sessions = self.sessions.write().await;
            let before = sessions.len();
            sessions.retain(|_, s| s.user_id != user_id && s.started_at >= cutoff);
            before - sessions.len()
        };

        if dropped_tasks + dropped_sessions > 0 {
            debug!(target: "engine", %user_id, dropped_tasks, dropped_sessions, "Pruned stale registry entries");
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn profile(&self, user_id: &str) -> Result<UserProfile, EngineError> {
        self.profiles
            .read()
            .await
            .get(user_id)
            .cloned()
            .ok_or_else(|| EngineError::UnknownUser(user_id.to_string()))
    }

    /// Generate up to `lookahead` independent tasks from a snapshot of the profile.
    #[instrument(level = "info", skip(self))]
    pub async fn issue_tasks(&self, user_id: &str, count: usize) -> Result<Vec<TaskRecord>, EngineError> {
        let profile = self.profile(user_id).await?;
        let n = count.clamp(1, self.config.lookahead.max(1));
        let now = now_ms();

        let tasks: Vec<TaskRecord> = {
            let mut rng = rand::thread_rng();
            (0..n)
                .map(|_| select_and_generate(&profile, &self.config, &self.lexicon, &mut rng, now))
                .collect()
        };

        let mut issued = self.issued.write().await;
        for t in &tasks {
            issued.insert(
                t.id.clone(),
                IssuedTask { user_id: user_id.to_string(), task: t.clone(), issued_at: now },
            );
        }
        Ok(tasks)
    }

    /// Evaluate + adapt one outcome, replace the stored profile, emit analytics.
    #[instrument(level = "info", skip(self, report), fields(user_id = %report.user_id, task_id = %report.task_id))]
    pub async fn apply_outcome(&self, report: &OutcomeReport) -> Result<AppliedOutcome, EngineError> {
        let session = self
            .sessions
            .read()
            .await
            .get(&report.session_id)
            .cloned()
            .filter(|s| s.user_id == report.user_id)
            .ok_or_else(|| EngineError::InvalidRequest(format!("unknown session {}", report.session_id)))?;

        let mut profiles = self.profiles.write().await;
        let current = profiles
            .get(&report.user_id)
            .ok_or_else(|| EngineError::UnknownUser(report.user_id.clone()))?;

        let issued = {
            let mut issued = self.issued.write().await;
            let owned = issued
                .get(&report.task_id)
                .is_some_and(|t| t.user_id == report.user_id);
            if owned { issued.remove(&report.task_id) } else { None }
        };
        let Some(issued) = issued else {
            warn!(target: "engine", task_id = %report.task_id, "Outcome for unknown task");
            return Err(EngineError::UnknownTask(report.task_id.clone()));
        };

        let now = now_ms();
        debug!(target: "engine", task_id = %report.task_id, since_issued_ms = now - issued.issued_at, "Issued task answered");
        let ctx = SessionContext {
            session_id: session.session_id.clone(),
            session_started_at: session.started_at,
            task_started_at: report.start_time,
        };
        let outcome = evaluate(&issued.task, report.success, report.time_spent_ms, report.was_skipped, &ctx, now);
        let adaptation = adapt(current, &outcome, &self.config);
        profiles.insert(report.user_id.clone(), adaptation.profile.clone());
        drop(profiles);

        self.analytics
            .record(&AnalyticsEvent::new(&report.user_id, &outcome, Some(&adaptation.decision)));

        Ok(AppliedOutcome { outcome, decision: adaptation.decision, profile: adaptation.profile })
    }
}
