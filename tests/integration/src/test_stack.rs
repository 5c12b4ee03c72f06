//! Topology-building integration tests.

#[cfg(test)]
mod tests {
    use nimbus_core::ComponentKind;
    use nimbus_stack::template::{BucketSpec, SubscriptionProtocol, SubscriptionSpec, TopicSpec};
    use nimbus_stack::{ResourceSpec, StackError, StackTemplate};

    use crate::{engine, sample_template};

    #[test]
    fn test_should_deliver_published_message_to_subscribed_queue() {
        let nimbus = engine();
        nimbus
            .build_stack(&sample_template())
            .unwrap_or_else(|e| panic!("build failed: {e}"));

        nimbus
            .publish("alerts", "hello")
            .unwrap_or_else(|e| panic!("publish failed: {e}"));

        // Exactly one message lands on the queue.
        let message = nimbus
            .receive_message("work")
            .unwrap_or_else(|e| panic!("receive failed: {e}"))
            .unwrap_or_else(|| panic!("expected the published message"));
        assert_eq!(message.body, "hello");

        nimbus
            .delete_message("work", &message.receipt_handle)
            .unwrap_or_else(|e| panic!("delete failed: {e}"));
        let drained = nimbus
            .receive_message("work")
            .unwrap_or_else(|e| panic!("receive failed: {e}"));
        assert!(drained.is_none(), "queue should hold exactly one message");
    }

    #[test]
    fn test_should_build_independent_engines_from_same_template() {
        let first = engine();
        let second = engine();
        let template = sample_template();

        first
            .build_stack(&template)
            .unwrap_or_else(|e| panic!("first build failed: {e}"));
        second
            .build_stack(&template)
            .unwrap_or_else(|e| panic!("second build failed: {e}"));

        let ids_first = first.component_identifiers();
        let ids_second = second.component_identifiers();
        assert_eq!(ids_first.len(), ids_second.len());

        for (a, b) in ids_first.iter().zip(&ids_second) {
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.name, b.name);
            // Queue URLs and topic ARNs are generated per engine; bucket
            // ARNs derive from the name alone.
            if matches!(a.kind, ComponentKind::Queue | ComponentKind::Topic) {
                assert_ne!(
                    a.endpoint, b.endpoint,
                    "generated endpoints must differ across engines"
                );
            }
        }

        // Both topologies start out empty.
        for nimbus in [&first, &second] {
            let object = nimbus
                .get_object("inbox", "anything")
                .unwrap_or_else(|e| panic!("get failed: {e}"));
            assert!(object.is_none());
            let message = nimbus
                .receive_message("work")
                .unwrap_or_else(|e| panic!("receive failed: {e}"));
            assert!(message.is_none());
        }
    }

    #[test]
    fn test_should_ignore_inert_resource_kinds() {
        let nimbus = engine();
        let template = sample_template()
            .with_resource("CpuAlarm", ResourceSpec::Alarm)
            .with_resource("ExecRole", ResourceSpec::Role)
            .with_resource("AccessPolicy", ResourceSpec::Policy)
            .with_resource("QueueAccess", ResourceSpec::QueuePolicy)
            .with_resource("InvokeGrant", ResourceSpec::FunctionPermission)
            .with_resource("NightlyRule", ResourceSpec::EventRule);

        nimbus
            .build_stack(&template)
            .unwrap_or_else(|e| panic!("inert kinds must not fail the build: {e}"));
        assert!(nimbus.s3().bucket_exists("inbox"));
    }

    #[test]
    fn test_should_fail_on_unknown_resource_kind() {
        let nimbus = engine();
        let template = sample_template().with_resource("Mystery", ResourceSpec::Unknown);

        let result = nimbus.build_stack(&template);
        assert!(
            matches!(result, Err(StackError::UnsupportedResource { ref name }) if name == "Mystery"),
            "expected UnsupportedResource, got {result:?}"
        );
    }

    #[test]
    fn test_should_reject_literal_endpoint_subscription() {
        let nimbus = engine();
        let template = StackTemplate::default().with_resource(
            "Alerts",
            ResourceSpec::Topic(TopicSpec {
                topic_name: "alerts".to_owned(),
                subscriptions: vec![SubscriptionSpec::literal_endpoint(
                    SubscriptionProtocol::Sqs,
                    "arn:aws:sqs:us-east-1:000000000000:external",
                )],
            }),
        );

        let result = nimbus.build_stack(&template);
        assert!(
            matches!(result, Err(StackError::LiteralEndpointUnsupported { .. })),
            "expected LiteralEndpointUnsupported, got {result:?}"
        );
    }

    #[test]
    fn test_should_reject_subscription_to_undeclared_resource() {
        let nimbus = engine();
        let template = StackTemplate::default().with_resource(
            "Alerts",
            ResourceSpec::Topic(TopicSpec {
                topic_name: "alerts".to_owned(),
                subscriptions: vec![SubscriptionSpec::queue_attribute("NotDeclared")],
            }),
        );

        let result = nimbus.build_stack(&template);
        assert!(
            matches!(result, Err(StackError::UnknownResource { .. })),
            "expected UnknownResource, got {result:?}"
        );
    }

    #[test]
    fn test_should_reject_subscription_to_non_queue_resource() {
        let nimbus = engine();
        let template = StackTemplate::default()
            .with_resource(
                "Inbox",
                ResourceSpec::Bucket(BucketSpec {
                    bucket_name: "inbox".to_owned(),
                }),
            )
            .with_resource(
                "Alerts",
                ResourceSpec::Topic(TopicSpec {
                    topic_name: "alerts".to_owned(),
                    subscriptions: vec![SubscriptionSpec::queue_attribute("Inbox")],
                }),
            );

        let result = nimbus.build_stack(&template);
        assert!(
            matches!(result, Err(StackError::InvalidReference { .. })),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[test]
    fn test_should_reject_rebuilding_same_template_into_same_engine() {
        let nimbus = engine();
        let template = sample_template();
        nimbus
            .build_stack(&template)
            .unwrap_or_else(|e| panic!("first build failed: {e}"));

        let result = nimbus.build_stack(&template);
        assert!(
            result.is_err(),
            "rebuilding must reject duplicate component names"
        );
    }

    #[test]
    fn test_should_skip_function_resources() {
        let nimbus = engine();
        let template = sample_template().with_resource(
            "Resizer",
            ResourceSpec::Function(nimbus_stack::template::FunctionSpec {
                function_name: "resizer".to_owned(),
            }),
        );

        nimbus
            .build_stack(&template)
            .unwrap_or_else(|e| panic!("build failed: {e}"));
        assert!(
            !nimbus.lambda().is_registered("resizer"),
            "function resources are declared only; handlers come from the engine API"
        );
    }
}
