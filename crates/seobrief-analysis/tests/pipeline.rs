//! End-to-end pipeline tests against wiremock-backed providers.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use seobrief_analysis::{
    render_sections, run_research, CompetitionLevel, JourneyStage, PipelineOptions,
    ResearchRequest,
};
use seobrief_core::{CompetitorDocument, Intent};
use seobrief_providers::{KeywordMetricsClient, Outcome, SerpClient};

const OVERVIEW: &str = "Keyword;Search Volume;CPC;Competition;Number of Results;Trends\n\
                        mutuo prima casa;22200;2.50;0.80;45600000;0.81,1.00\n";

const RELATED: &str = "Keyword;Search Volume;CPC;Competition\n\
                       come ottenere il mutuo prima casa;2900;0.5;0.2\n\
                       mutuo prima casa giovani;9900;1.8;0.9\n\
                       confronto mutuo prima casa;1300;1.1;0.6\n\
                       requisiti mutuo;880;0.4;0.1\n";

fn clients(server: &MockServer) -> (KeywordMetricsClient, SerpClient) {
    let metrics =
        KeywordMetricsClient::with_base_url(Some("semrush-key"), 5, "seobrief-test/0.1", &server.uri())
            .expect("metrics client");
    let serp = SerpClient::with_base_url(Some("serper-key"), 5, "seobrief-test/0.1", "it", &server.uri())
        .expect("serp client");
    (metrics, serp)
}

fn competitors() -> Vec<CompetitorDocument> {
    vec![
        CompetitorDocument::from_manual_entry(
            1,
            "https://a.it/mutuo",
            Some("Mutuo prima casa: guida"),
            "",
            "COME FUNZIONA IL MUTUO PRIMA CASA\n\nIl tasso è importante per chi compra casa.",
        ),
        CompetitorDocument::from_manual_entry(
            2,
            "https://b.it/mutuo",
            None,
            "",
            "Mutuo prima casa e sostenibilità energetica della casa.",
        ),
        CompetitorDocument::from_manual_entry(
            3,
            "https://c.it/mutuo",
            None,
            "",
            "Il mutuo prima casa per giovani under 36.",
        ),
    ]
}

async fn mount_serp(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "peopleAlsoAsk": [
                {"question": "Come si ottiene il mutuo prima casa?"},
                {"question": "Cosa serve per il mutuo?"},
                {"question": "Quando conviene il tasso fisso?"},
                {"question": "Differenza tra mutuo fisso e variabile"}
            ],
            "relatedSearches": [{"query": "mutuo prima casa under 36"}],
            "organic": [
                {"position": 1, "title": "Mutuo", "link": "https://a.it/mutuo", "snippet": "..."}
            ]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn full_run_populates_every_stage() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("type", "phrase_organic"))
        .respond_with(ResponseTemplate::new(200).set_body_string(OVERVIEW))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("type", "phrase_related"))
        .and(query_param("display_limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RELATED))
        .mount(&server)
        .await;
    mount_serp(&server).await;

    let (metrics, serp) = clients(&server);
    let request = ResearchRequest::new("mutuo prima casa, mutuo giovani", "IT", competitors());

    let bundle = run_research(&request, &PipelineOptions::default(), &metrics, &serp).await;

    assert_eq!(bundle.main_keyword, "mutuo prima casa");
    assert_eq!(bundle.all_keywords.len(), 2);
    assert!(bundle.keyword_metric.is_success());
    assert_eq!(bundle.related_keywords.len(), 4);

    // every related keyword is classified exactly once
    assert_eq!(bundle.intent_buckets.len(), 4);
    assert_eq!(bundle.intent_buckets.informational.len(), 2);
    assert_eq!(bundle.intent_buckets.transactional.len(), 1);
    assert_eq!(bundle.intent_buckets.commercial.len(), 1);

    let mutuo = &bundle.topic_clusters["mutuo"];
    assert_eq!(mutuo.keywords.len(), 4);
    assert_eq!(mutuo.total_volume, 2900 + 9900 + 1300 + 880);
    assert_eq!(bundle.topic_clusters["prima"].keywords.len(), 3);

    let insight = &bundle.search_intent;
    assert_eq!(insight.primary_intent, Intent::Transactional);
    assert_eq!(insight.user_journey_stage, JourneyStage::Decision);
    assert_eq!(insight.competition_level, CompetitionLevel::Medium);
    let share_sum: f64 = insight.intent_distribution.values().sum();
    assert!((share_sum - 1.0).abs() < 1e-9);
    assert!(insight.content_suggestions.faq_needed);
    assert!(insight.content_suggestions.how_to_needed);
    assert!(!insight.content_suggestions.comparison_needed);

    assert!(bundle
        .competitor_insights
        .content_gaps
        .contains(&"sostenibilità".to_string()));
    assert_eq!(bundle.competitor_insights.content_depth_analysis.len(), 3);

    let prompt = render_sections(&bundle).to_prompt_block();
    assert!(prompt.contains("DATI KEYWORD PRINCIPALE \"mutuo prima casa\""));
    assert!(prompt.contains("CLUSTER TEMATICI"));
    assert!(prompt.contains("PEOPLE ALSO ASK"));
    assert!(prompt.contains("--- COMPETITOR 3 ---"));

    let json = serde_json::to_value(&bundle).expect("bundle serializes");
    assert_eq!(json["keyword_metric"]["status"], "success");
    assert_eq!(json["serp"]["status"], "success");
}

#[tokio::test]
async fn failed_metric_skips_related_but_keeps_serp() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("type", "phrase_organic"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("type", "phrase_related"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RELATED))
        .expect(0)
        .mount(&server)
        .await;
    mount_serp(&server).await;

    let (metrics, serp) = clients(&server);
    let request = ResearchRequest::new("mutuo prima casa", "it", competitors());

    let bundle = run_research(&request, &PipelineOptions::default(), &metrics, &serp).await;

    assert!(matches!(bundle.keyword_metric, Outcome::Failed(_)));
    assert!(bundle.related_keywords.is_empty());
    assert!(bundle.intent_buckets.is_empty());
    assert!(bundle.topic_clusters.is_empty());
    assert!(bundle.serp.is_success());

    let insight = &bundle.search_intent;
    assert_eq!(insight.primary_intent, Intent::Informational);
    assert_eq!(insight.competition_level, CompetitionLevel::Medium);
    assert!(insight.intent_distribution.is_empty());
    assert!(insight.content_suggestions.faq_needed);

    let sections = render_sections(&bundle);
    assert!(sections.keyword_metrics.is_empty());
    assert!(!sections.serp.is_empty());
}

#[tokio::test]
async fn disabled_stages_make_no_calls() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("type", "phrase_organic"))
        .respond_with(ResponseTemplate::new(200).set_body_string(OVERVIEW))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("type", "phrase_related"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RELATED))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (metrics, serp) = clients(&server);
    let options = PipelineOptions {
        related_keywords: false,
        serp: false,
        competitor_analysis: false,
        ..PipelineOptions::default()
    };
    let request = ResearchRequest::new("mutuo prima casa", "it", competitors());

    let bundle = run_research(&request, &options, &metrics, &serp).await;

    assert!(bundle.keyword_metric.is_success());
    assert!(matches!(bundle.serp, Outcome::NotConfigured));
    assert!(bundle.related_keywords.is_empty());
    assert!(bundle.competitor_insights.content_depth_analysis.is_empty());
    assert_eq!(bundle.search_intent.primary_intent, Intent::Transactional);
}

#[tokio::test]
async fn intent_distribution_survives_disabled_bucket_output() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("type", "phrase_organic"))
        .respond_with(ResponseTemplate::new(200).set_body_string(OVERVIEW))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("type", "phrase_related"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RELATED))
        .mount(&server)
        .await;

    let (metrics, serp) = clients(&server);
    let options = PipelineOptions {
        intent_classification: false,
        serp: false,
        ..PipelineOptions::default()
    };
    let request = ResearchRequest::new("mutuo prima casa", "it", Vec::new());

    let bundle = run_research(&request, &options, &metrics, &serp).await;

    assert_eq!(bundle.related_keywords.len(), 4);
    assert!(bundle.intent_buckets.is_empty());

    let distribution = &bundle.search_intent.intent_distribution;
    assert!(!distribution.is_empty());
    let total: f64 = distribution.values().sum();
    assert!((total - 1.0).abs() < 1e-9, "distribution sums to {total}");
}
