//! Resource graph builder for the Aurora Serverless v2 stack
//!
//! Single code path: validate the configuration, resolve the ambient
//! lookups, then either short-circuit to sentinel outputs or declare the
//! fixed resource topology. The external orchestration engine does the
//! actual apply; this module only produces the plan it consumes.

use crate::config::StackConfig;
use crate::outputs::OutputBundle;
use crate::plan::Plan;
use crate::provider::Provider;
use crate::resource::{
    Cluster, ClusterInstance, ClusterParameterGroup, InstanceParameterGroup, RandomPassword,
    SecurityGroup, Subnet, SubnetGroup, instance::REPLICA_PROMOTION_TIER,
    password::PASSWORD_LENGTH,
};
use anyhow::{Context, Result};
use log::{debug, info};
use rand::Rng;
use resgraph::{Graph, Value};

/// Length of the per-deployment name suffix
const SUFFIX_LENGTH: usize = 8;

const SUFFIX_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const PASSWORD_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Build the plan for one configuration record
///
/// Fails before declaring anything if the configuration is invalid.
/// Randomness (name suffix, master password) comes from the injected
/// RNG, so a seeded RNG yields a fully deterministic plan.
pub fn build(
    config: &StackConfig,
    provider: &impl Provider,
    rng: &mut (impl Rng + ?Sized),
) -> Result<Plan> {
    config.validate()?;

    // Read-only lookups, needed in both branches.
    let region = provider.region()?;
    let vpc = provider.default_vpc()?;

    let mut graph = Graph::new();

    if !config.create_rds_postgres {
        debug!("createRdsPostgres is off, emitting sentinel outputs");
        return Ok(Plan::new(graph, OutputBundle::sentinel(region, vpc.id)));
    }

    let zones = provider.availability_zones()?;
    // Each zone falls back to the provider list independently of the
    // other's override. An explicit zone1 matching a provider-resolved
    // zone2 is not rejected here; callers own that collision.
    let az1 = resolve_zone(config.availability_zone1.as_deref(), &zones, 0)?;
    let az2 = resolve_zone(config.availability_zone2.as_deref(), &zones, 1)?;
    info!("placing instances in zones {az1} and {az2}");

    let suffix = random_string(rng, SUFFIX_CHARSET, SUFFIX_LENGTH);
    let password = random_string(rng, PASSWORD_CHARSET, PASSWORD_LENGTH);

    let name = &config.resource_name;

    let subnet1 = graph.declare(
        Subnet {
            logical_name: format!("{name}-private-subnet-1"),
            vpc_id: vpc.id.clone(),
            cidr_block: config.private_subnet1_cidr.clone(),
            availability_zone: az1.clone(),
            tag_name: name.clone(),
        }
        .declaration(),
    )?;

    let subnet2 = graph.declare(
        Subnet {
            logical_name: format!("{name}-private-subnet-2"),
            vpc_id: vpc.id.clone(),
            cidr_block: config.private_subnet2_cidr.clone(),
            availability_zone: az2.clone(),
            tag_name: name.clone(),
        }
        .declaration(),
    )?;

    let security_group = graph.declare(
        SecurityGroup {
            logical_name: format!("{name}-db-security-group"),
            vpc_id: vpc.id.clone(),
            vpc_cidr: vpc.cidr_block.clone(),
            tag_name: name.clone(),
        }
        .declaration(),
    )?;

    let cluster_params = graph.declare(
        ClusterParameterGroup {
            logical_name: format!("{name}-cluster-param-group"),
            name: format!("{name}-cluster-pg-{suffix}"),
            engine_version: config.db_engine_version.clone(),
        }
        .declaration(),
    )?;

    let instance_params = graph.declare(
        InstanceParameterGroup {
            logical_name: format!("{name}-instance-param-group"),
            name: format!("{name}-instance-pg-{suffix}"),
            engine_version: config.db_engine_version.clone(),
        }
        .declaration(),
    )?;

    let subnet_group = graph.declare(
        SubnetGroup {
            logical_name: format!("{name}-db-subnet-group"),
            name: format!("{name}-db-subnet-group-{suffix}"),
            subnet_ids: vec![subnet1.attr("id"), subnet2.attr("id")],
            tag_name: name.clone(),
        }
        .declaration(),
    )?;

    let db_password = graph.declare(
        RandomPassword {
            logical_name: format!("{name}-db-password"),
            result: password.clone(),
        }
        .declaration(),
    )?;

    let cluster = graph.declare(
        Cluster {
            logical_name: name.clone(),
            engine_version: config.db_engine_version.clone(),
            database_name: config.db_name.clone(),
            master_password: db_password.attr("result"),
            min_capacity: config.min_capacity,
            max_capacity: config.max_capacity,
            db_subnet_group_name: subnet_group.attr("name"),
            security_group_id: security_group.attr("id"),
            cluster_parameter_group_name: cluster_params.attr("name"),
            tag_name: name.clone(),
        }
        .declaration(),
    )?;

    let primary = graph.declare(
        ClusterInstance {
            logical_name: format!("{name}-primary-instance"),
            cluster_id: cluster.attr("id"),
            engine_version: cluster.attr("engineVersion"),
            db_parameter_group_name: instance_params.attr("name"),
            availability_zone: az1,
            promotion_tier: None,
            tag_name: name.clone(),
        }
        .declaration(),
    )?;

    // The replica must not race the primary on cluster creation, so it
    // carries an explicit ordering edge on top of its references.
    graph.declare(
        ClusterInstance {
            logical_name: format!("{name}-replica-instance"),
            cluster_id: cluster.attr("id"),
            engine_version: cluster.attr("engineVersion"),
            db_parameter_group_name: instance_params.attr("name"),
            availability_zone: az2,
            promotion_tier: Some(REPLICA_PROMOTION_TIER),
            tag_name: name.clone(),
        }
        .declaration()
        .depends_on(&primary),
    )?;

    info!("declared {} resources for stack '{name}'", graph.len());

    let outputs = OutputBundle {
        cluster_endpoint: cluster.attr("endpoint"),
        cluster_reader_endpoint: cluster.attr("readerEndpoint"),
        db_name_output: cluster.attr("databaseName"),
        db_username: cluster.attr("masterUsername"),
        db_password_secret: Value::secret(password),
        vpc_id: vpc.id,
        created: true,
        region,
    };

    Ok(Plan::new(graph, outputs))
}

/// Explicit override wins; otherwise take the provider's zone at `index`
fn resolve_zone(overridden: Option<&str>, zones: &[String], index: usize) -> Result<String> {
    if let Some(zone) = overridden {
        return Ok(zone.to_string());
    }
    zones
        .get(index)
        .cloned()
        .with_context(|| format!("provider returned no availability zone at index {index}"))
}

fn random_string(rng: &mut (impl Rng + ?Sized), charset: &[u8], length: usize) -> String {
    (0..length)
        .map(|_| charset[rng.random_range(0..charset.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::demo_config;
    use crate::outputs::NOT_CREATED;
    use crate::provider::{StaticProvider, VpcInfo};
    use crate::resource::{cluster, instance, parameter_group, password, security_group, subnet, subnet_group};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use resgraph::diff_graphs;

    fn test_provider() -> StaticProvider {
        StaticProvider::new(
            "eu-west-2",
            VpcInfo {
                id: "vpc-0abc".to_string(),
                cidr_block: "172.31.0.0/16".to_string(),
            },
            vec![
                "eu-west-2a".to_string(),
                "eu-west-2b".to_string(),
                "eu-west-2c".to_string(),
            ],
        )
    }

    fn build_demo(config: &StackConfig, seed: u64) -> Plan {
        let mut rng = StdRng::seed_from_u64(seed);
        build(config, &test_provider(), &mut rng).unwrap()
    }

    #[test]
    fn disabled_stack_declares_nothing_and_returns_sentinels() {
        let mut config = demo_config();
        config.create_rds_postgres = false;

        let plan = build_demo(&config, 1);
        assert!(plan.resources.is_empty());

        let outputs = &plan.outputs;
        assert!(!outputs.created);
        assert_eq!(outputs.cluster_endpoint.as_str(), Some(NOT_CREATED));
        assert_eq!(outputs.cluster_reader_endpoint.as_str(), Some(NOT_CREATED));
        assert_eq!(outputs.db_name_output.as_str(), Some(NOT_CREATED));
        assert_eq!(outputs.db_username.as_str(), Some(NOT_CREATED));
        assert_eq!(outputs.db_password_secret.as_secret(), Some(NOT_CREATED));
        assert!(outputs.db_password_secret.is_secret());
        // The ambient lookups still resolve.
        assert_eq!(outputs.region, "eu-west-2");
        assert_eq!(outputs.vpc_id, "vpc-0abc");
    }

    #[test]
    fn enabled_stack_declares_the_fixed_topology() {
        let plan = build_demo(&demo_config(), 1);
        let graph = &plan.resources;

        assert_eq!(graph.len(), 10);
        assert_eq!(graph.count_kind(subnet::KIND), 2);
        assert_eq!(graph.count_kind(security_group::KIND), 1);
        assert_eq!(graph.count_kind(parameter_group::CLUSTER_KIND), 1);
        assert_eq!(graph.count_kind(parameter_group::INSTANCE_KIND), 1);
        assert_eq!(graph.count_kind(subnet_group::KIND), 1);
        assert_eq!(graph.count_kind(password::KIND), 1);
        assert_eq!(graph.count_kind(cluster::KIND), 1);
        assert_eq!(graph.count_kind(instance::KIND), 2);

        for name in [
            "demo-private-subnet-1",
            "demo-private-subnet-2",
            "demo-db-security-group",
            "demo-cluster-param-group",
            "demo-instance-param-group",
            "demo-db-subnet-group",
            "demo-db-password",
            "demo",
            "demo-primary-instance",
            "demo-replica-instance",
        ] {
            assert!(graph.contains(name), "missing declaration '{name}'");
        }
    }

    #[test]
    fn replica_depends_on_primary_and_is_never_promoted_first() {
        let plan = build_demo(&demo_config(), 1);
        let replica = plan.resources.get("demo-replica-instance").unwrap();

        assert_eq!(replica.depends_on, vec!["demo-primary-instance"]);
        assert_eq!(
            replica.properties.get("promotionTier"),
            Some(&Value::Int(REPLICA_PROMOTION_TIER))
        );

        let primary = plan.resources.get("demo-primary-instance").unwrap();
        assert!(primary.depends_on.is_empty());
        assert!(!primary.properties.contains_key("promotionTier"));
    }

    #[test]
    fn live_outputs_reference_the_cluster() {
        let plan = build_demo(&demo_config(), 1);
        let outputs = &plan.outputs;

        assert!(outputs.created);
        assert_eq!(outputs.cluster_endpoint, Value::reference("demo", "endpoint"));
        assert_eq!(
            outputs.cluster_reader_endpoint,
            Value::reference("demo", "readerEndpoint")
        );
        assert_eq!(
            outputs.db_name_output,
            Value::reference("demo", "databaseName")
        );
        assert_eq!(
            outputs.db_username,
            Value::reference("demo", "masterUsername")
        );
        let pw = outputs.db_password_secret.as_secret().unwrap();
        assert_eq!(pw.len(), PASSWORD_LENGTH);
        assert_ne!(pw, NOT_CREATED);
    }

    #[test]
    fn suffix_is_eight_lowercase_alphanumerics() {
        let plan = build_demo(&demo_config(), 42);
        let group = plan.resources.get("demo-cluster-param-group").unwrap();
        let physical = group.properties.get("name").unwrap().as_str().unwrap();
        let suffix = physical.strip_prefix("demo-cluster-pg-").unwrap();

        assert_eq!(suffix.len(), SUFFIX_LENGTH);
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn engine_version_controls_parameter_group_family() {
        let mut config = demo_config();
        config.db_engine_version = "15.4".to_string();
        let plan = build_demo(&config, 1);

        for logical in ["demo-cluster-param-group", "demo-instance-param-group"] {
            let group = plan.resources.get(logical).unwrap();
            assert_eq!(
                group.properties.get("family"),
                Some(&Value::from("aurora-postgresql15"))
            );
        }
    }

    #[test]
    fn zone_overrides_win_over_provider_order() {
        let mut config = demo_config();
        config.availability_zone1 = Some("eu-west-2c".to_string());
        config.availability_zone2 = Some("eu-west-2a".to_string());
        let plan = build_demo(&config, 1);

        let subnet1 = plan.resources.get("demo-private-subnet-1").unwrap();
        let subnet2 = plan.resources.get("demo-private-subnet-2").unwrap();
        assert_eq!(
            subnet1.properties.get("availabilityZone"),
            Some(&Value::from("eu-west-2c"))
        );
        assert_eq!(
            subnet2.properties.get("availabilityZone"),
            Some(&Value::from("eu-west-2a"))
        );
    }

    #[test]
    fn single_zone_override_still_resolves_a_distinct_second_zone() {
        let mut config = demo_config();
        config.availability_zone1 = Some("eu-west-2a".to_string());
        let plan = build_demo(&config, 1);

        let zone = |logical: &str| {
            plan.resources
                .get(logical)
                .unwrap()
                .properties
                .get("availabilityZone")
                .unwrap()
                .as_str()
                .unwrap()
                .to_string()
        };
        let zone1 = zone("demo-private-subnet-1");
        let zone2 = zone("demo-private-subnet-2");

        assert_eq!(zone1, "eu-west-2a");
        // Zone 2 falls back to the provider list, second entry.
        assert_eq!(zone2, "eu-west-2b");
        assert_ne!(zone1, zone2);
    }

    #[test]
    fn capacity_violation_fails_before_any_declaration() {
        let mut config = demo_config();
        config.min_capacity = 8.0;
        config.max_capacity = 2.0;

        let mut rng = StdRng::seed_from_u64(1);
        let err = build(&config, &test_provider(), &mut rng).unwrap_err();
        assert!(err.to_string().contains("minCapacity"));
    }

    #[test]
    fn empty_resource_name_fails_before_any_declaration() {
        let mut config = demo_config();
        config.resource_name = String::new();

        let mut rng = StdRng::seed_from_u64(1);
        assert!(build(&config, &test_provider(), &mut rng).is_err());
    }

    #[test]
    fn same_seed_yields_identical_graphs() {
        let config = demo_config();
        let a = build_demo(&config, 7);
        let b = build_demo(&config, 7);
        assert_eq!(a.resources, b.resources);
        assert_eq!(a.outputs, b.outputs);
    }

    #[test]
    fn different_seed_changes_only_suffixed_names_and_the_password() {
        let config = demo_config();
        let a = build_demo(&config, 1);
        let b = build_demo(&config, 2);

        // Same shape: same logical names and kinds, in the same order.
        let shape = |plan: &Plan| {
            plan.resources
                .iter()
                .map(|d| (d.name.clone(), d.kind.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(shape(&a), shape(&b));

        // Structural diff confined to the suffix-bearing physical names;
        // the regenerated password counts as equivalent.
        let diff = diff_graphs(&a.resources, &b.resources);
        assert!(diff.added.is_empty());
        assert!(diff.removed.is_empty());
        let mut changed: Vec<&str> = diff.changed.iter().map(|c| c.name.as_str()).collect();
        changed.sort_unstable();
        assert_eq!(
            changed,
            vec![
                "demo-cluster-param-group",
                "demo-db-subnet-group",
                "demo-instance-param-group",
            ]
        );
        for change in &diff.changed {
            assert_eq!(change.fields, vec!["name"]);
        }
    }
}
