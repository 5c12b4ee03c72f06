//! Bucket-event integration tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use nimbus_s3_core::{BucketEvent, BucketEventKind, S3EventNotification};
    use parking_lot::Mutex;

    use crate::{engine, sample_template, test_name};

    #[test]
    fn test_should_observe_writes_in_subscriber_registration_order() {
        let nimbus = engine();
        let bucket = test_name("observed");
        nimbus
            .create_bucket(&bucket)
            .unwrap_or_else(|e| panic!("create bucket failed: {e}"));

        let order = Arc::new(Mutex::new(Vec::new()));
        for tag in ["first", "second"] {
            let order = order.clone();
            nimbus
                .subscribe_bucket_events(
                    &bucket,
                    BucketEventKind::ObjectCreated,
                    Arc::new(move |event: &BucketEvent| {
                        order.lock().push(format!("{tag}:{}:{}", event.key, event.size));
                        Ok(())
                    }),
                )
                .unwrap_or_else(|e| panic!("subscribe failed: {e}"));
        }

        nimbus
            .put_object(&bucket, "doc", "12345")
            .unwrap_or_else(|e| panic!("put failed: {e}"));

        assert_eq!(*order.lock(), vec!["first:doc:5", "second:doc:5"]);
    }

    #[test]
    fn test_should_bridge_object_writes_onto_queue() {
        let nimbus = engine();
        nimbus
            .build_stack(&sample_template())
            .unwrap_or_else(|e| panic!("build failed: {e}"));

        nimbus
            .subscribe_queue_to_bucket_events("work", "inbox", BucketEventKind::ObjectCreated)
            .unwrap_or_else(|e| panic!("bridge failed: {e}"));

        let stored = nimbus
            .put_object("inbox", "orders/42.json", "{\"qty\": 7}")
            .unwrap_or_else(|e| panic!("put failed: {e}"));

        let message = nimbus
            .receive_message("work")
            .unwrap_or_else(|e| panic!("receive failed: {e}"))
            .unwrap_or_else(|| panic!("expected a bridged event message"));

        let notification: S3EventNotification = serde_json::from_str(&message.body)
            .unwrap_or_else(|e| panic!("event record did not parse: {e}"));
        let record = &notification.records[0];
        assert_eq!(record.event_name, "ObjectCreated:Put");
        assert_eq!(record.s3.bucket.name, "inbox");
        assert_eq!(record.s3.object.key, "orders/42.json");
        assert_eq!(record.s3.object.size, stored.size);
        assert_eq!(record.s3.object.e_tag, stored.etag);

        nimbus
            .delete_message("work", &message.receipt_handle)
            .unwrap_or_else(|e| panic!("delete failed: {e}"));
        let drained = nimbus
            .receive_message("work")
            .unwrap_or_else(|e| panic!("receive failed: {e}"));
        assert!(drained.is_none(), "exactly one record per write");
    }

    #[test]
    fn test_should_complete_write_when_subscriber_fails() {
        let nimbus = engine();
        let bucket = test_name("faulty");
        nimbus
            .create_bucket(&bucket)
            .unwrap_or_else(|e| panic!("create bucket failed: {e}"));

        let delivered = Arc::new(Mutex::new(Vec::new()));
        nimbus
            .subscribe_bucket_events(
                &bucket,
                BucketEventKind::ObjectCreated,
                Arc::new(|_| anyhow::bail!("subscriber down")),
            )
            .unwrap_or_else(|e| panic!("subscribe failed: {e}"));
        let sink = delivered.clone();
        nimbus
            .subscribe_bucket_events(
                &bucket,
                BucketEventKind::ObjectCreated,
                Arc::new(move |event: &BucketEvent| {
                    sink.lock().push(event.key.clone());
                    Ok(())
                }),
            )
            .unwrap_or_else(|e| panic!("subscribe failed: {e}"));

        nimbus
            .put_object(&bucket, "doc", "body")
            .unwrap_or_else(|e| panic!("a failing subscriber must not fail the write: {e}"));

        assert_eq!(*delivered.lock(), vec!["doc"]);
    }

    #[test]
    fn test_should_publish_to_all_topic_subscribers_despite_failure() {
        let nimbus = engine();
        let topic = test_name("fanout");
        nimbus
            .create_topic(&topic)
            .unwrap_or_else(|e| panic!("create topic failed: {e}"));

        let seen = Arc::new(Mutex::new(Vec::new()));
        for tag in ["a", "b"] {
            let seen = seen.clone();
            nimbus
                .subscribe_topic(
                    &topic,
                    Arc::new(move |body: &str| {
                        if tag == "a" {
                            anyhow::bail!("first subscriber down");
                        }
                        seen.lock().push(format!("{tag}:{body}"));
                        Ok(())
                    }),
                )
                .unwrap_or_else(|e| panic!("subscribe failed: {e}"));
        }

        let delivered = nimbus
            .publish(&topic, "payload")
            .unwrap_or_else(|e| panic!("publish failed: {e}"));
        assert_eq!(delivered, 2);
        assert_eq!(*seen.lock(), vec!["b:payload"]);
    }
}
