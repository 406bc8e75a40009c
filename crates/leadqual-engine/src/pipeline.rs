//! Scoring run orchestration.

use crate::classify::IntentClassifier;
use crate::error::EngineError;
use crate::score::{combine_score, rule_score};
use crate::store::ScoreStore;
use crate::types::{LeadSummary, ScoringRun};

/// Run one scoring pass over every lead against the latest offer.
///
/// 1. Load all leads and the most recent offer. Missing offer, then empty
///    lead set, fail the run before any classifier call.
/// 2. For each lead, sequentially: rule score → intent classification →
///    combined final score → persist a result row → append a summary record.
///    Classification calls are rate- and cost-sensitive, so the loop is
///    deliberately serial; the classifier call is the only suspension point.
/// 3. Return the summary records and their count.
///
/// Classifier failures are absorbed inside the classifier (fixed Medium
/// fallback) and never abort the run. A persistence failure does abort the
/// remaining iteration; rows already written in the same run stay committed —
/// there is no run-level transaction, no retry, and no protection against a
/// concurrently issued run.
///
/// # Errors
///
/// - [`EngineError::NoOffer`] / [`EngineError::NoLeads`] when preconditions fail.
/// - [`EngineError::Store`] when a load or a result write fails.
pub async fn run_scoring<S, C>(store: &S, classifier: &C) -> Result<ScoringRun, EngineError>
where
    S: ScoreStore,
    C: IntentClassifier,
{
    let leads = store.list_leads().await?;
    let offer = store.latest_offer().await?.ok_or(EngineError::NoOffer)?;
    if leads.is_empty() {
        return Err(EngineError::NoLeads);
    }

    tracing::info!(offer_id = offer.id, leads = leads.len(), "starting scoring run");

    let mut results = Vec::with_capacity(leads.len());
    for lead in leads {
        let rule = rule_score(&lead);
        let verdict = classifier.classify(&lead, &offer).await;
        let score = combine_score(rule, verdict.points);

        store
            .insert_result(lead.id, offer.id, &verdict.intent, score, &verdict.reasoning)
            .await?;

        tracing::debug!(
            lead_id = lead.id,
            rule,
            intent = %verdict.intent,
            score,
            "lead scored"
        );

        results.push(LeadSummary {
            lead_id: lead.id,
            name: lead.name,
            role: lead.role,
            company: lead.company,
            intent: verdict.intent,
            score,
            reasoning: verdict.reasoning,
        });
    }

    Ok(ScoringRun {
        count: results.len(),
        results,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use leadqual_core::{Lead, Offer};

    use super::*;
    use crate::store::StoreError;
    use crate::types::Verdict;

    struct StubStore {
        leads: Vec<Lead>,
        offer: Option<Offer>,
        inserted: Mutex<Vec<(i64, i64, String, i32, String)>>,
        fail_insert_at: Option<usize>,
    }

    impl StubStore {
        fn new(leads: Vec<Lead>, offer: Option<Offer>) -> Self {
            Self {
                leads,
                offer,
                inserted: Mutex::new(Vec::new()),
                fail_insert_at: None,
            }
        }

        fn inserted(&self) -> Vec<(i64, i64, String, i32, String)> {
            self.inserted.lock().unwrap().clone()
        }
    }

    impl ScoreStore for StubStore {
        async fn list_leads(&self) -> Result<Vec<Lead>, StoreError> {
            Ok(self.leads.clone())
        }

        async fn latest_offer(&self) -> Result<Option<Offer>, StoreError> {
            Ok(self.offer.clone())
        }

        async fn insert_result(
            &self,
            lead_id: i64,
            offer_id: i64,
            intent: &str,
            score: i32,
            reasoning: &str,
        ) -> Result<i64, StoreError> {
            let mut inserted = self.inserted.lock().unwrap();
            if self.fail_insert_at == Some(inserted.len()) {
                return Err(StoreError::new(std::io::Error::other("disk full")));
            }
            inserted.push((
                lead_id,
                offer_id,
                intent.to_string(),
                score,
                reasoning.to_string(),
            ));
            #[allow(clippy::cast_possible_wrap)]
            Ok(inserted.len() as i64)
        }
    }

    struct StubClassifier {
        intent: &'static str,
        points: i32,
        calls: AtomicUsize,
    }

    impl StubClassifier {
        fn returning(intent: &'static str, points: i32) -> Self {
            Self {
                intent,
                points,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl IntentClassifier for StubClassifier {
        async fn classify(&self, _lead: &Lead, _offer: &Offer) -> Verdict {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Verdict {
                intent: self.intent.to_string(),
                reasoning: "stub".to_string(),
                points: self.points,
            }
        }
    }

    fn sample_lead(id: i64) -> Lead {
        Lead {
            id,
            name: "Jane".into(),
            role: "VP Sales".into(),
            company: "Acme".into(),
            industry: "SaaS".into(),
            location: "NY".into(),
            linkedin_bio: "bio".into(),
        }
    }

    fn sample_offer() -> Offer {
        Offer {
            id: 3,
            name: "X".into(),
            value_props: vec!["a".into(), "b".into()],
            ideal_use_cases: vec!["c".into()],
        }
    }

    #[tokio::test]
    async fn missing_offer_fails_before_classification() {
        let store = StubStore::new(vec![sample_lead(1)], None);
        let classifier = StubClassifier::returning("High", 50);

        let result = run_scoring(&store, &classifier).await;
        assert!(matches!(result, Err(EngineError::NoOffer)));
        assert_eq!(classifier.calls(), 0);
        assert!(store.inserted().is_empty());
    }

    #[tokio::test]
    async fn missing_offer_is_reported_before_empty_lead_set() {
        // With both preconditions unmet, the missing offer wins.
        let store = StubStore::new(Vec::new(), None);
        let classifier = StubClassifier::returning("High", 50);

        let result = run_scoring(&store, &classifier).await;
        assert!(matches!(result, Err(EngineError::NoOffer)));
        assert_eq!(classifier.calls(), 0);
    }

    #[tokio::test]
    async fn empty_lead_set_fails_before_classification() {
        let store = StubStore::new(Vec::new(), Some(sample_offer()));
        let classifier = StubClassifier::returning("High", 50);

        let result = run_scoring(&store, &classifier).await;
        assert!(matches!(result, Err(EngineError::NoLeads)));
        assert_eq!(classifier.calls(), 0);
    }

    #[tokio::test]
    async fn high_intent_lead_scores_one_hundred_end_to_end() {
        let store = StubStore::new(vec![sample_lead(1)], Some(sample_offer()));
        let classifier = StubClassifier::returning("High", 50);

        let run = run_scoring(&store, &classifier).await.unwrap();
        assert_eq!(run.count, 1);
        let summary = &run.results[0];
        assert_eq!(summary.lead_id, 1);
        assert_eq!(summary.intent, "High");
        // Rule score 50 (VP + SaaS + complete) plus 50 AI points, capped view.
        assert_eq!(summary.score, 100);

        let inserted = store.inserted();
        assert_eq!(inserted.len(), 1);
        let (lead_id, offer_id, intent, score, _) = &inserted[0];
        assert_eq!((*lead_id, *offer_id), (1, 3));
        assert_eq!(intent, "High");
        assert_eq!(*score, 100);
    }

    #[tokio::test]
    async fn every_lead_is_classified_and_persisted_in_order() {
        let store = StubStore::new(
            vec![sample_lead(1), sample_lead(2), sample_lead(3)],
            Some(sample_offer()),
        );
        let classifier = StubClassifier::returning("Low", 10);

        let run = run_scoring(&store, &classifier).await.unwrap();
        assert_eq!(run.count, 3);
        assert_eq!(classifier.calls(), 3);
        let ids: Vec<i64> = store.inserted().iter().map(|r| r.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        // 50 rule + 10 AI points.
        assert!(run.results.iter().all(|r| r.score == 60));
    }

    #[tokio::test]
    async fn insert_failure_aborts_run_but_keeps_earlier_writes() {
        let mut store = StubStore::new(
            vec![sample_lead(1), sample_lead(2), sample_lead(3)],
            Some(sample_offer()),
        );
        store.fail_insert_at = Some(1);
        let classifier = StubClassifier::returning("Medium", 30);

        let result = run_scoring(&store, &classifier).await;
        assert!(matches!(result, Err(EngineError::Store(_))));
        // Lead 1 committed before the failure on lead 2; lead 3 never reached.
        assert_eq!(store.inserted().len(), 1);
        assert_eq!(classifier.calls(), 2);
    }
}
