//! Function-invocation integration tests.

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use nimbus_stack::StackError;

    use crate::{engine, test_name};

    #[test]
    fn test_should_invoke_function_with_its_own_name_in_context() {
        let nimbus = engine();
        let name = test_name("greeter");
        nimbus
            .register_function(
                &name,
                Box::new(|payload, ctx| {
                    let input = String::from_utf8_lossy(&payload);
                    Ok(Bytes::from(format!(
                        "{} handled by {}",
                        input, ctx.function_name
                    )))
                }),
            )
            .unwrap_or_else(|e| panic!("register failed: {e}"));

        let output = nimbus
            .invoke_function(&name, "ping")
            .unwrap_or_else(|e| panic!("invoke failed: {e}"));
        assert_eq!(
            String::from_utf8_lossy(&output),
            format!("ping handled by {name}")
        );
    }

    #[test]
    fn test_should_pass_json_payloads_through_untouched() {
        let nimbus = engine();
        let name = test_name("doubler");
        nimbus
            .register_function(
                &name,
                Box::new(|payload, _ctx| {
                    let value: serde_json::Value = serde_json::from_slice(&payload)?;
                    let doubled = value["qty"]
                        .as_u64()
                        .map(|qty| qty * 2)
                        .unwrap_or_default();
                    Ok(Bytes::from(
                        serde_json::json!({ "qty": doubled }).to_string(),
                    ))
                }),
            )
            .unwrap_or_else(|e| panic!("register failed: {e}"));

        let output = nimbus
            .invoke_function(&name, r#"{"qty": 21}"#.to_owned())
            .unwrap_or_else(|e| panic!("invoke failed: {e}"));
        let value: serde_json::Value = serde_json::from_slice(&output)
            .unwrap_or_else(|e| panic!("output did not parse: {e}"));
        assert_eq!(value["qty"], 42);
    }

    #[test]
    fn test_should_error_on_unregistered_function() {
        let nimbus = engine();
        let result = nimbus.invoke_function("never-registered", Bytes::new());
        assert!(
            matches!(result, Err(StackError::Lambda(_))),
            "expected a lambda error, got {result:?}"
        );
    }

    #[test]
    fn test_should_drive_function_from_queue_messages() {
        let nimbus = engine();
        let queue = test_name("jobs");
        let function = test_name("worker");

        nimbus
            .create_queue(&queue)
            .unwrap_or_else(|e| panic!("create queue failed: {e}"));
        nimbus
            .register_function(
                &function,
                Box::new(|payload, _ctx| {
                    let body = String::from_utf8_lossy(&payload);
                    Ok(Bytes::from(format!("done:{body}")))
                }),
            )
            .unwrap_or_else(|e| panic!("register failed: {e}"));

        nimbus
            .send_message(&queue, "job-1")
            .unwrap_or_else(|e| panic!("send failed: {e}"));

        // Poll the queue and feed the body to the function, the way an
        // application worker loop would.
        let message = nimbus
            .receive_message(&queue)
            .unwrap_or_else(|e| panic!("receive failed: {e}"))
            .unwrap_or_else(|| panic!("expected a job message"));
        let output = nimbus
            .invoke_function(&function, message.body.clone())
            .unwrap_or_else(|e| panic!("invoke failed: {e}"));
        nimbus
            .delete_message(&queue, &message.receipt_handle)
            .unwrap_or_else(|e| panic!("delete failed: {e}"));

        assert_eq!(String::from_utf8_lossy(&output), "done:job-1");
    }
}
