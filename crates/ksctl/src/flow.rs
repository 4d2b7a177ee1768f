//! Guarded mutation protocol.
//!
//! Every state-changing command runs the same sequence:
//! fetch → preview → precondition → confirm → apply → report.
//!
//! Commands implement [`GuardedMutation`] and the driver enforces the
//! ordering: the preview always precedes the precondition check, the check
//! always precedes the prompt, the prompt always precedes the single
//! apply attempt, and the success line is printed only after the apply
//! call returned without error. A satisfied precondition short-circuits
//! with an explanatory message and never prompts; a declined prompt is
//! success that changed nothing and prints no success message.

use std::fmt::Debug;

use async_trait::async_trait;
use kube::api::PostParams;
use kube::{Api, Resource, ResourceExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::term::Terminal;
use crate::{Error, Result};

/// Result of a command-specific precondition check against the fetched
/// target. Hard requirement failures are ordinary `Err` returns instead.
#[derive(Debug)]
pub enum Precondition {
    /// The mutation is meaningful; proceed to confirmation.
    Proceed,
    /// The target is already in the desired state: print the message and
    /// exit successfully without ever prompting.
    NothingToDo(String),
}

/// Terminal state of one protocol run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Declined,
    NothingToDo,
}

/// One state-changing command's contribution to the protocol.
#[async_trait]
pub trait GuardedMutation: Send {
    type Target: Clone + Debug + Serialize + Send + Sync;

    /// Banner title for the preview of the fetched target.
    fn preview_title(&self) -> String;

    /// Business precondition, evaluated against the fetched target after
    /// the preview has been shown.
    fn check(&self, target: &Self::Target) -> Result<Precondition>;

    /// Irreversible-consequence warning. `Some` turns the prompt into a
    /// danger-zone prompt.
    fn danger_warning(&self) -> Option<String> {
        None
    }

    /// The yes/no question put to the operator.
    fn question(&self) -> String;

    /// Mutate and submit. Called at most once per invocation, and only
    /// after an affirmative answer. Submission errors are reported
    /// verbatim and the in-memory mutation is discarded.
    async fn apply(&mut self, target: Self::Target) -> Result<()>;

    /// Printed only after `apply` succeeded.
    fn success_message(&self) -> String;
}

/// Fetch the target by name and run it through the protocol.
pub async fn run<M>(
    term: &mut Terminal,
    api: &Api<M::Target>,
    namespace: &str,
    name: &str,
    mutation: M,
) -> Result<Outcome>
where
    M: GuardedMutation,
    M::Target: Resource<DynamicType = ()> + DeserializeOwned,
{
    let target = fetch(api, namespace, name).await?;
    execute(term, mutation, target).await
}

/// Get by name, surfacing a 404 as the typed not-found error with the
/// resource's qualified name. There is no silent creation.
pub async fn fetch<T>(api: &Api<T>, namespace: &str, name: &str) -> Result<T>
where
    T: Resource<DynamicType = ()> + Clone + DeserializeOwned + Debug,
{
    match api.get(name).await {
        Ok(object) => Ok(object),
        Err(kube::Error::Api(response)) if response.code == 404 => {
            Err(Error::not_found(T::kind(&()).into_owned(), namespace, name))
        }
        Err(e) => Err(e.into()),
    }
}

/// Submit the mutated object as a single update call.
pub async fn update<T>(api: &Api<T>, object: T) -> Result<T>
where
    T: Resource<DynamicType = ()> + Clone + DeserializeOwned + Serialize + Debug,
{
    let name = object.name_any();
    debug!("submitting update for '{}'", name);
    api.replace(&name, &PostParams::default(), &object)
        .await
        .map_err(Error::from)
}

/// Drive an already-fetched target through preview, precondition,
/// confirmation, apply and report.
pub async fn execute<M>(term: &mut Terminal, mut mutation: M, target: M::Target) -> Result<Outcome>
where
    M: GuardedMutation,
{
    term.print_object(&mutation.preview_title(), &target)?;

    match mutation.check(&target)? {
        Precondition::NothingToDo(message) => {
            term.println(message)?;
            Ok(Outcome::NothingToDo)
        }
        Precondition::Proceed => {
            let confirmed = match mutation.danger_warning() {
                Some(warning) => term.confirm_destructive(warning, mutation.question())?,
                None => term.confirm(mutation.question())?,
            };

            if !confirmed {
                debug!("operator declined, nothing changed");
                return Ok(Outcome::Declined);
            }

            mutation.apply(target).await?;
            term.println(mutation.success_message())?;
            Ok(Outcome::Applied)
        }
    }
}
