//! Shorthand for the two effects the wizard returns most: a one-shot async
//! job that may report back, and an action scheduled for later.

/// Wrap an async block into [`Effect::Future`](crate::effect::Effect::Future).
///
/// The block must evaluate to `Option<Action>`; `None` means the job has
/// nothing to report.
///
/// ```rust,ignore
/// use studio_quote_core::async_effect;
///
/// let gateway = Arc::clone(&env.gateway);
/// async_effect! {
///     match gateway.send_quotation(payload).await {
///         Ok(status) => Some(QuotationAction::Sent { status }),
///         Err(error) => Some(QuotationAction::SubmissionFailed { error }),
///     }
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(::std::boxed::Box::pin(async move { $($body)* }))
    };
}

/// Build an [`Effect::Delay`](crate::effect::Effect::Delay) that dispatches
/// `action` once `duration` has elapsed.
///
/// ```rust,ignore
/// use studio_quote_core::delay;
///
/// delay! {
///     duration: env.config.notice_duration,
///     action: QuotationAction::DismissNotice { id }
/// }
/// ```
#[macro_export]
macro_rules! delay {
    (duration: $duration:expr, action: $action:expr $(,)?) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::effect::Effect;
    use std::time::Duration;

    #[derive(Clone, Debug, PartialEq)]
    enum Ping {
        Answered(u16),
        Expired,
    }

    #[tokio::test]
    async fn async_effect_runs_its_body() {
        let status = 204;
        let effect = async_effect! { Some(Ping::Answered(status)) };

        match effect {
            Effect::Future(fut) => assert_eq!(fut.await, Some(Ping::Answered(204))),
            other => unreachable!("expected a future, got {other:?}"),
        }
    }

    #[test]
    fn delay_boxes_the_action() {
        let effect = delay! {
            duration: Duration::from_millis(2500),
            action: Ping::Expired,
        };

        match effect {
            Effect::Delay { duration, action } => {
                assert_eq!(duration, Duration::from_millis(2500));
                assert_eq!(*action, Ping::Expired);
            },
            other => unreachable!("expected a delay, got {other:?}"),
        }
    }
}
