//! End-to-end advisory engine tests

use std::sync::Arc;

use cloudvisor_rs::core::catalog::InstanceCatalog;
use cloudvisor_rs::core::engine::AdvisoryEngine;
use cloudvisor_rs::core::models::CloudProvider;
use cloudvisor_rs::utils::error::AdvisorError;

use crate::common::{
    CarbonFactory, CatalogFactory, ConfigFactory, EvaluationFactory, ScriptedEvaluator,
    StaticPricing,
};

async fn engine_with(
    pricing: StaticPricing,
    evaluator: ScriptedEvaluator,
    intensities: &[(&str, f64)],
) -> AdvisoryEngine {
    AdvisoryEngine::new(
        Arc::new(CatalogFactory::with_pricing(pricing)),
        Arc::new(evaluator),
        Arc::new(CarbonFactory::seeded(intensities).await),
    )
}

#[tokio::test]
async fn test_lift_and_shift_recommends_smallest_fit() {
    let engine = engine_with(
        StaticPricing::unfiltered(),
        ScriptedEvaluator::failing(),
        &[],
    )
    .await;

    // 8 vcpu / 32 GB requirement against instances (8,32), (8,64), (16,32).
    let result = engine
        .lift_and_shift(&ConfigFactory::on_prem(), &CloudProvider::Aws)
        .unwrap();

    assert_eq!(result.configuration.instance_type, "m6g.2xlarge");
    assert_eq!(result.configuration.name, "db-01-lift&shift");
}

#[tokio::test]
async fn test_right_size_recommends_cheaper_instance() {
    let evaluator = ScriptedEvaluator::new(vec![
        ("m6g.4xlarge", EvaluationFactory::costed(100.0, 40.0, 60.0)),
        ("r6g.2xlarge", EvaluationFactory::costed(45.0, 15.0, 30.0)),
        ("r6g.4xlarge", EvaluationFactory::costed(120.0, 50.0, 70.0)),
    ]);
    let engine = engine_with(StaticPricing::unfiltered(), evaluator, &[]).await;

    let result = engine
        .right_size(&ConfigFactory::cloud("m6g.4xlarge", 30.0))
        .await
        .unwrap();

    assert_eq!(result.configuration.instance_type, "r6g.2xlarge");
    assert_eq!(result.estimated_load, Some(60.0));
    assert_eq!(result.cost.unwrap().total, 45.0);
}

#[tokio::test]
async fn test_greener_region_moves_to_cleanest_zone() {
    let pricing = StaticPricing::unfiltered().with_regions(
        "m6g.2xlarge",
        &["eu-west-1", "eu-west-3", "eu-central-1"],
    );
    let engine = engine_with(
        pricing,
        ScriptedEvaluator::failing(),
        &[("IE", 290.0), ("FR", 56.0), ("DE", 380.0)],
    )
    .await;

    let result = engine
        .greener_region(&ConfigFactory::cloud("m6g.2xlarge", 30.0))
        .await
        .unwrap();

    assert_eq!(result.configuration.usage.location.as_deref(), Some("FR"));
}

#[tokio::test]
async fn test_advisory_pipeline_chains_strategies() {
    let pricing = StaticPricing::unfiltered()
        .with_regions("r6g.2xlarge", &["eu-west-1", "eu-west-3"]);
    let evaluator = ScriptedEvaluator::new(vec![
        ("m6g.2xlarge", EvaluationFactory::costed(30.0, 10.0, 20.0)),
        ("r6g.2xlarge", EvaluationFactory::costed(25.0, 8.0, 17.0)),
    ]);
    let engine = engine_with(pricing, evaluator, &[("IE", 290.0), ("FR", 56.0)]).await;

    let mut workload = ConfigFactory::on_prem();
    workload.usage.location = Some("IE".to_string());

    // On-premise workload lands on the smallest adequate instance.
    let lifted = engine
        .lift_and_shift(&workload, &CloudProvider::Aws)
        .unwrap();
    assert_eq!(lifted.configuration.instance_type, "m6g.2xlarge");

    // The lifted instance still runs at 50%: the cheaper sibling wins.
    let right_sized = engine.right_size(&lifted.configuration).await.unwrap();
    assert_eq!(right_sized.configuration.instance_type, "r6g.2xlarge");

    // Finally the workload moves to the cleanest grid zone.
    let greener = engine
        .greener_region(&right_sized.configuration)
        .await
        .unwrap();
    assert_eq!(greener.configuration.usage.location.as_deref(), Some("FR"));
}

#[tokio::test]
async fn test_catalog_listing_respects_pricing_and_delisting() {
    let catalog = InstanceCatalog::from_listings(
        vec![
            CatalogFactory::aws_listing(),
            CatalogFactory::listing(
                CloudProvider::Scaleway,
                &[("dev1-s", 2.0, 2.0), ("dev1-m", 3.0, 4.0)],
            ),
        ],
        Arc::new(StaticPricing::priceable(&["m6g.medium", "m6g.xlarge", "dev1-s"])),
    );
    let engine = AdvisoryEngine::new(
        Arc::new(catalog),
        Arc::new(ScriptedEvaluator::failing()),
        Arc::new(CarbonFactory::seeded(&[]).await),
    );

    // Delisted providers never appear in the listing.
    assert_eq!(engine.providers(), vec![CloudProvider::Aws]);

    // Listed ids are the catalog/priceable intersection, sorted.
    assert_eq!(
        engine.instance_types(&CloudProvider::Aws).unwrap(),
        vec!["m6g.medium".to_string(), "m6g.xlarge".to_string()]
    );

    // Delisted providers stay directly queryable.
    assert_eq!(
        engine.instance_types(&CloudProvider::Scaleway).unwrap(),
        vec!["dev1-s".to_string()]
    );
}

#[tokio::test]
async fn test_unknown_provider_is_user_error() {
    let engine = engine_with(
        StaticPricing::unfiltered(),
        ScriptedEvaluator::failing(),
        &[],
    )
    .await;

    let err = engine.instance_types(&CloudProvider::Azure).unwrap_err();
    assert!(matches!(err, AdvisorError::UnknownProvider(_)));
    assert!(err.is_user_error());
}
