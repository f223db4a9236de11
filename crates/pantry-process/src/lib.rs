//! Asynchronous computations that report progress before settling.
//!
//! A [`Process`] is a lazy computation that, once driven, emits zero or more
//! progress states of type `S` and then settles to exactly one outcome: a
//! success `T` or a failure `E`. Every long-running operation in Pantry (recipe
//! fetches, resolution) is a process, so deep compositions propagate both
//! progress and failures through the same combinators.
//!
//! Nothing runs until the process is consumed through [`Process::states`],
//! [`Process::result`] or [`Process::observe`].

use std::fmt;
use std::future::Future;

use futures_util::future::{self, FutureExt};
use futures_util::stream::{self, BoxStream, Stream, StreamExt};

/// One item of a process stream. `Settled` is always the last item.
enum Step<S, T, E> {
    State(S),
    Settled(Result<T, E>),
}

/// A deferred computation emitting progress states `S`, then exactly one
/// `Result<T, E>`.
pub struct Process<S, T, E> {
    steps: BoxStream<'static, Step<S, T, E>>,
}

impl<S, T, E> Process<S, T, E>
where
    S: Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    /// A process with no states that succeeds with `value`.
    pub fn just(value: T) -> Self {
        Self::settled(Ok(value))
    }

    /// A process that replays `states` in order, then succeeds with `value`.
    pub fn just_with<I>(states: I, value: T) -> Self
    where
        I: IntoIterator<Item = S>,
        I::IntoIter: Send + 'static,
    {
        let states = stream::iter(states).map(Step::State);
        let settled = stream::once(future::ready(Step::Settled(Ok(value))));
        Self {
            steps: states.chain(settled).boxed(),
        }
    }

    /// A process with no states that fails with `err`.
    pub fn error(err: E) -> Self {
        Self::settled(Err(err))
    }

    /// A process with no states that settles to `outcome`.
    pub fn from_result(outcome: Result<T, E>) -> Self {
        Self::settled(outcome)
    }

    /// A process with no states that adopts the outcome of `fut`.
    pub fn from_future<F>(fut: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self {
            steps: stream::once(fut.map(Step::Settled)).boxed(),
        }
    }

    fn settled(outcome: Result<T, E>) -> Self {
        Self {
            steps: stream::once(future::ready(Step::Settled(outcome))).boxed(),
        }
    }

    /// Forward this process's states, then replace its outcome with the
    /// process `next` builds from it.
    fn then_settled<U, E2, F>(self, next: F) -> Process<S, U, E2>
    where
        U: Send + 'static,
        E2: Send + 'static,
        F: FnOnce(Result<T, E>) -> Process<S, U, E2> + Send + 'static,
    {
        let mut next = Some(next);
        let steps = self
            .steps
            .flat_map(move |step| match step {
                Step::State(s) => stream::once(future::ready(Step::State(s))).boxed(),
                Step::Settled(outcome) => match next.take() {
                    Some(next) => next(outcome).steps,
                    None => stream::empty().boxed(),
                },
            })
            .boxed();
        Process { steps }
    }

    /// Run this process, then the one `continuation` builds from its value.
    ///
    /// States of both are forwarded in order and the second outcome is
    /// adopted. On failure the continuation is never invoked.
    pub fn chain<U, F>(self, continuation: F) -> Process<S, U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Process<S, U, E> + Send + 'static,
    {
        self.then_settled(move |outcome| match outcome {
            Ok(value) => continuation(value),
            Err(err) => Process::error(err),
        })
    }

    /// Run this process for its states, discard its value and continue with
    /// `next`. `next` is not started if this process fails.
    pub fn concat<U>(self, next: Process<S, U, E>) -> Process<S, U, E>
    where
        U: Send + 'static,
    {
        self.chain(move |_| next)
    }

    /// Left-fold [`Process::chain`] over `steps`: each step receives the value
    /// produced by the one before it.
    pub fn chain_n<I, F>(self, steps: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: FnOnce(T) -> Self + Send + 'static,
    {
        steps
            .into_iter()
            .fold(self, |process, step| process.chain(step))
    }

    /// Transform the success value.
    pub fn map<U, F>(self, f: F) -> Process<S, U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        self.then_settled(move |outcome| Process::settled(outcome.map(f)))
    }

    /// Transform the failure.
    pub fn map_err<E2, F>(self, f: F) -> Process<S, T, E2>
    where
        E2: Send + 'static,
        F: FnOnce(E) -> E2 + Send + 'static,
    {
        self.then_settled(move |outcome| Process::settled(outcome.map_err(f)))
    }

    /// Run `branches` concurrently.
    ///
    /// States of all branches are interleaved as they arrive. The joined
    /// process always succeeds, with each branch's outcome at that branch's
    /// position, whatever order the branches finished in.
    pub fn join_all<I>(branches: I) -> Process<S, Vec<Result<T, E>>, E>
    where
        I: IntoIterator<Item = Process<S, T, E>>,
    {
        let tagged: Vec<BoxStream<'static, (usize, Step<S, T, E>)>> = branches
            .into_iter()
            .enumerate()
            .map(|(index, branch)| branch.steps.map(move |step| (index, step)).boxed())
            .collect();
        let mut outcomes: Vec<Option<Result<T, E>>> = Vec::new();
        outcomes.resize_with(tagged.len(), || None);

        let merged = stream::select_all(tagged);
        let steps = stream::unfold(Some((merged, outcomes)), |state| async move {
            let Some((mut merged, mut outcomes)) = state else {
                return None;
            };
            loop {
                match merged.next().await {
                    Some((_, Step::State(s))) => {
                        return Some((Step::State(s), Some((merged, outcomes))));
                    }
                    Some((index, Step::Settled(outcome))) => outcomes[index] = Some(outcome),
                    None => {
                        let results = outcomes.into_iter().flatten().collect();
                        return Some((Step::Settled(Ok(results)), None));
                    }
                }
            }
        })
        .boxed();
        Process { steps }
    }

    /// The progress states, ending when the process settles. The outcome is
    /// dropped.
    pub fn states(self) -> impl Stream<Item = S> + Send {
        self.steps.filter_map(|step| {
            future::ready(match step {
                Step::State(s) => Some(s),
                Step::Settled(_) => None,
            })
        })
    }

    /// Drive the process to completion and return its outcome.
    pub async fn result(self) -> Result<T, E> {
        self.observe(|_| {}).await
    }

    /// Drive the process, handing each state to `on_state`, and return its
    /// outcome.
    pub async fn observe<F>(mut self, mut on_state: F) -> Result<T, E>
    where
        F: FnMut(S),
    {
        while let Some(step) = self.steps.next().await {
            match step {
                Step::State(s) => on_state(s),
                Step::Settled(outcome) => return outcome,
            }
        }
        unreachable!("every process stream ends with its outcome")
    }
}

impl<S, T, E> fmt::Debug for Process<S, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Process").finish_non_exhaustive()
    }
}
