use fiscal_flow_builder::*;

fn record(
    path: &[&str],
    account_name: &str,
    account_detail: Option<&str>,
    expenditure: Option<&str>,
    amount: f64,
) -> LedgerRecord {
    LedgerRecord {
        organization_path: path.iter().map(|s| s.to_string()).collect(),
        activity: None,
        sub_item: None,
        account_name: account_name.to_string(),
        account_detail: account_detail.map(|s| s.to_string()),
        expenditure: expenditure.map(|s| s.to_string()),
        amount,
    }
}

fn leaf_names(node: &TreeNode) -> Vec<String> {
    match node {
        TreeNode::Leaf { name, .. } => vec![name.clone()],
        TreeNode::Branch { children, .. } => children.iter().flat_map(leaf_names).collect(),
    }
}

fn ministry_fixture() -> Vec<LedgerRecord> {
    vec![
        // Roads / Maintenance: the spec's basic-aggregation scenario.
        record(
            &["Roads", "Maintenance"],
            "Salaries and wages",
            None,
            Some("Operating"),
            1_000_000.0,
        ),
        record(
            &["Roads", "Maintenance"],
            "Transfer payments",
            Some("Bridge Grant"),
            Some("Operating"),
            5_000_000.0,
        ),
        record(
            &["Roads", "Maintenance"],
            "Transfer payments",
            Some("Signage Grant"),
            Some("Operating"),
            500.0,
        ),
        // Roads / Planning: operational only, with a recovery netting down.
        record(
            &["Roads", "Planning"],
            "Services",
            None,
            Some("Operating"),
            800_000.0,
        ),
        record(
            &["Roads", "Planning"],
            "Recoveries",
            None,
            Some("Operating"),
            -300_000.0,
        ),
        // Health: single program, capital spending plus a small grant.
        record(
            &["Health", "Hospitals"],
            "Capital Expense",
            Some("New Wing Fund"),
            Some("Capital"),
            12_000_000.0,
        ),
        record(
            &["Health", "Hospitals"],
            "Transfer payments",
            Some("Clinic Grant"),
            Some("Operating"),
            40_000.0,
        ),
        // Education: record without a program level.
        record(
            &["Education"],
            "Supplies and equipment",
            None,
            Some("Operating"),
            90_000.0,
        ),
    ]
}

#[test]
fn test_full_pipeline_preserves_every_dollar() {
    let records = ministry_fixture();
    let expected: f64 = records.iter().map(|r| r.amount).sum();

    let tree = build_flow_tree("Spending", &records, &AggregationConfig::default()).unwrap();

    assert!((tree.leaf_sum() - expected).abs() < 0.01);
    // And the validator agrees when re-run by hand.
    assert!(validate(&tree, expected, 0.01).is_ok());
}

#[test]
fn test_full_pipeline_structure() {
    let tree =
        build_flow_tree("Spending", &ministry_fixture(), &AggregationConfig::default()).unwrap();

    let names = leaf_names(&tree);
    assert!(names.contains(&"Roads → Maintenance → Operations".to_string()));
    assert!(names.contains(&"Roads → Maintenance → Bridge Grant".to_string()));
    assert!(names.contains(&"Roads → Maintenance → Other".to_string()));
    assert!(names.contains(&"Roads → Planning → Operations".to_string()));
    assert!(names.contains(&"Health → Hospitals → Capital Expense: New Wing Fund".to_string()));
    assert!(names.contains(&"Health → Hospitals → Other".to_string()));
    assert!(names.contains(&"Education → (Unspecified) → Operations".to_string()));
    // The sub-threshold grants were folded, not kept.
    assert!(!names.iter().any(|n| n.contains("Signage Grant")));
    assert!(!names.iter().any(|n| n.contains("Clinic Grant")));
}

#[test]
fn test_negative_amounts_net_into_single_operations_leaf() {
    let records = vec![
        record(
            &["Roads", "Planning"],
            "Services",
            None,
            Some("Operating"),
            500_000.0,
        ),
        record(
            &["Roads", "Planning"],
            "Recoveries",
            None,
            Some("Operating"),
            -200_000.0,
        ),
    ];

    let tree = build_flow_tree("Spending", &records, &AggregationConfig::default()).unwrap();

    let names = leaf_names(&tree);
    assert_eq!(names, vec!["Roads → Planning → Operations".to_string()]);
    assert!((tree.leaf_sum() - 300_000.0).abs() < 0.01);
}

#[test]
fn test_all_records_on_one_aggregation_key() {
    let records: Vec<LedgerRecord> = (0..50)
        .map(|_| {
            record(
                &["Roads", "Maintenance"],
                "Transfer payments",
                Some("Bridge Grant"),
                Some("Operating"),
                100_000.0,
            )
        })
        .collect();

    let tree = build_flow_tree("Spending", &records, &AggregationConfig::default()).unwrap();

    // One key, one leaf, full sum.
    assert_eq!(leaf_names(&tree).len(), 1);
    assert!((tree.leaf_sum() - 5_000_000.0).abs() < 0.01);
}

#[test]
fn test_validator_rejects_a_dropped_record() {
    // Stand-in for a corrupted builder: aggregate normally, then validate
    // against a total that includes one extra record the tree never saw.
    let records = ministry_fixture();
    let dropped = 40_000.0;
    let expected: f64 = records.iter().map(|r| r.amount).sum::<f64>() + dropped;

    let config = AggregationConfig::default();
    let built = HierarchyBuilder::new(&config.rules).build("Spending", &records);
    let tree = flatten_chains(apply_materiality(built, config.materiality_threshold));

    let err = validate(&tree, expected, 0.01).unwrap_err();
    match err {
        FlowTreeError::TotalMismatch { difference, .. } => {
            assert!(
                (difference + dropped).abs() < 0.01,
                "difference should equal the dropped record's amount, got {difference}"
            );
        }
        other => panic!("expected TotalMismatch, got {other:?}"),
    }
}

#[test]
fn test_flatten_is_a_fixed_point_of_the_pipeline() {
    let tree =
        build_flow_tree("Spending", &ministry_fixture(), &AggregationConfig::default()).unwrap();
    assert_eq!(flatten_chains(tree.clone()), tree);
}

#[test]
fn test_csv_to_dataset_end_to_end() -> anyhow::Result<()> {
    let spending_csv = "\
ministry,program,activity,sub_item,account_name,account_detail,expenditure_category,amount_dollars
Transportation,Highways,,,Salaries and wages,,Operating,2000000000
Transportation,Highways,,,Transfer payments,Winter Roads Program,Operating,500000000
Health,Hospitals,,,Services,,Operating,1000000000
";
    let revenue_csv = "\
ministry,program,activity,sub_item,account_name,account_detail,expenditure_category,amount_dollars
Taxation,Personal Income Tax,,,Transfer payments,Personal Income Tax Fund,Operating,3000000000
Taxation,Corporate Tax,,,Transfer payments,Corporate Tax Fund,Operating,1500000000
";

    let spending = read_ledger_csv(spending_csv.as_bytes())?;
    let revenue = read_ledger_csv(revenue_csv.as_bytes())?;

    let dataset = FlowDataset::from_records(&spending, &revenue, &AggregationConfig::default())?;

    assert!((dataset.spending - 3.5).abs() < 1e-9);
    assert!((dataset.revenue - 4.5).abs() < 1e-9);
    assert!((dataset.total - 4.5).abs() < 1e-9);

    // The serialized form round-trips through the wire contract.
    let json = dataset.to_json()?;
    let value: serde_json::Value = serde_json::from_str(&json)?;
    let spending_tree: TreeNode = serde_json::from_value(value["spending_data"].clone())?;
    assert!((spending_tree.leaf_sum() - 3_500_000_000.0).abs() < 0.01);

    Ok(())
}

#[test]
fn test_thresholding_respects_magnitude_for_negatives() {
    // A large negative recovery must stay individually named, not hide in
    // "Other".
    let records = vec![
        record(
            &["Health", "Hospitals"],
            "Transfer payments",
            Some("Clinic Grant"),
            Some("Operating"),
            5_000_000.0,
        ),
        record(
            &["Health", "Hospitals"],
            "Transfer payments",
            Some("Federal Cost Recovery Fund"),
            Some("Operating"),
            -3_000_000.0,
        ),
        record(
            &["Health", "Hospitals"],
            "Transfer payments",
            Some("Outreach Grant"),
            Some("Operating"),
            -40_000.0,
        ),
    ];

    let tree = build_flow_tree("Spending", &records, &AggregationConfig::default()).unwrap();
    let names = leaf_names(&tree);
    assert!(names.contains(&"Health → Hospitals → Federal Cost Recovery Fund".to_string()));
    assert!(names.contains(&"Health → Hospitals → Other".to_string()));
    assert!((tree.leaf_sum() - 1_960_000.0).abs() < 0.01);
}
