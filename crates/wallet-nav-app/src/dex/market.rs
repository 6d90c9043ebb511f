//! DEX market: the tradable pair list
//!
//! [`reduce`] is pure; the side effects a reduction asks for come back as a
//! [`MarketEffect`] and are run by the presenter without blocking the
//! reducer. Pair loading and search results arrive through feedbacks.

use std::sync::Arc;

use futures_util::future;
use futures_util::stream::{self, BoxStream};
use futures_util::StreamExt;
use tokio::sync::{mpsc, watch};
use wallet_nav_core::prelude::*;
use wallet_nav_core::{InfoPair, SmartPair};

use super::repository::PairsRepository;
use crate::feedback::{react, Feedback, System};
use crate::storage;

/// What the view should do with the latest state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    #[default]
    None,
    Update,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Pair(SmartPair),
}

impl Row {
    pub fn pair(&self) -> &SmartPair {
        match self {
            Row::Pair(pair) => pair,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Section {
    pub items: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct State {
    pub action: Action,
    pub section: Section,
}

impl State {
    fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ReadyView,
    SetPairs(Vec<SmartPair>),
    TapCheckMark(usize),
    TapInfoButton(usize),
    SearchTextChange(String),
}

/// Fire-and-forget work requested by a reduction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarketEffect {
    /// Persist the pair's new checked flag
    CheckMark(SmartPair),
    /// Hand the pair to the module output
    ShowInfo(InfoPair),
    Search(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduced {
    pub state: State,
    pub effect: Option<MarketEffect>,
}

impl Reduced {
    fn new(state: State) -> Self {
        Self {
            state,
            effect: None,
        }
    }

    fn with_effect(state: State, effect: MarketEffect) -> Self {
        Self {
            state,
            effect: Some(effect),
        }
    }
}

/// Fold one event into the market state. Indices past the end of the list
/// leave the rows untouched and request no effect.
pub fn reduce(mut state: State, event: Event) -> Reduced {
    match event {
        Event::ReadyView => Reduced::new(state.with_action(Action::None)),

        Event::SetPairs(pairs) => {
            state.section.items = pairs.into_iter().map(Row::Pair).collect();
            Reduced::new(state.with_action(Action::Update))
        }

        Event::TapCheckMark(index) => {
            let Some(row) = state.section.items.get_mut(index) else {
                debug!(index, "Check mark tapped outside the pair list");
                return Reduced::new(state);
            };
            let toggled = row.pair().toggled();
            *row = Row::Pair(toggled.clone());
            Reduced::with_effect(
                state.with_action(Action::Update),
                MarketEffect::CheckMark(toggled),
            )
        }

        Event::TapInfoButton(index) => {
            let info = state.section.items.get(index).map(|row| InfoPair::from(row.pair()));
            let state = state.with_action(Action::None);
            match info {
                Some(info) => Reduced::with_effect(state, MarketEffect::ShowInfo(info)),
                None => Reduced::new(state),
            }
        }

        Event::SearchTextChange(text) => Reduced::with_effect(
            state.with_action(Action::None),
            MarketEffect::Search(text),
        ),
    }
}

/// Pair operations behind the market screen
#[trait_variant::make(MarketInteractor: Send)]
pub trait LocalMarketInteractor {
    async fn pairs(&self) -> Result<Vec<SmartPair>>;

    /// Results for every query submitted through [`search_pair`](Self::search_pair)
    fn search_pairs(&self) -> BoxStream<'static, Result<Vec<SmartPair>>>;

    fn search_pair(&self, text: &str);

    async fn check_mark(&self, pair: &SmartPair) -> Result<()>;
}

/// [`MarketInteractor`] over a [`PairsRepository`].
///
/// Repository calls run on the blocking pool. An empty query lists every pair.
#[derive(Debug)]
pub struct DexMarketInteractor<R> {
    repository: Arc<R>,
    query: watch::Sender<String>,
}

impl<R> DexMarketInteractor<R>
where
    R: PairsRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        let (query, _) = watch::channel(String::new());
        Self { repository, query }
    }

    async fn blocking<T, F>(&self, call: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&R) -> Result<T> + Send + 'static,
    {
        run_blocking(self.repository.clone(), call).await
    }
}

async fn run_blocking<R, T, F>(repository: Arc<R>, call: F) -> Result<T>
where
    R: PairsRepository + 'static,
    T: Send + 'static,
    F: FnOnce(&R) -> Result<T> + Send + 'static,
{
    storage::run_blocking(move || call(&repository)).await
}

async fn search<R>(repository: Arc<R>, query: String) -> Result<Vec<SmartPair>>
where
    R: PairsRepository + 'static,
{
    run_blocking(repository, move |repository| {
        if query.trim().is_empty() {
            repository.list_pairs()
        } else {
            repository.search_pairs(&query)
        }
    })
    .await
}

impl<R> MarketInteractor for DexMarketInteractor<R>
where
    R: PairsRepository + 'static,
{
    async fn pairs(&self) -> Result<Vec<SmartPair>> {
        self.blocking(|repository| repository.list_pairs()).await
    }

    fn search_pairs(&self) -> BoxStream<'static, Result<Vec<SmartPair>>> {
        let queries = self.query.subscribe();
        stream::unfold(
            (queries, self.repository.clone()),
            |(mut queries, repository)| async move {
                queries.changed().await.ok()?;
                let query = queries.borrow_and_update().clone();
                let result = search(repository.clone(), query).await;
                Some((result, (queries, repository)))
            },
        )
        .boxed()
    }

    fn search_pair(&self, text: &str) {
        self.query.send_replace(text.to_string());
    }

    async fn check_mark(&self, pair: &SmartPair) -> Result<()> {
        let pair = pair.clone();
        self.blocking(move |repository| repository.set_checked(&pair))
            .await
    }
}

/// Wires the market reducer to its interactor and module output
pub struct DexMarketPresenter<I> {
    interactor: Arc<I>,
    output: mpsc::UnboundedSender<InfoPair>,
}

impl<I> DexMarketPresenter<I>
where
    I: MarketInteractor + Sync + 'static,
{
    /// `output` receives the pair whenever its info button is tapped
    pub fn new(interactor: Arc<I>, output: mpsc::UnboundedSender<InfoPair>) -> Self {
        Self { interactor, output }
    }

    /// Start the market system with the view's `feedbacks` plus pair loading
    /// and search.
    pub fn system(&self, mut feedbacks: Vec<Box<dyn Feedback<State, Event>>>) -> System<State, Event> {
        feedbacks.push(self.pairs_query());
        feedbacks.push(self.search_query());

        let interactor = self.interactor.clone();
        let output = self.output.clone();
        System::spawn(
            State::default(),
            move |state, event| {
                let Reduced { state, effect } = reduce(state, event);
                if let Some(effect) = effect {
                    run_effect(&interactor, &output, effect);
                }
                state
            },
            feedbacks,
        )
    }

    fn pairs_query(&self) -> Box<dyn Feedback<State, Event>> {
        let interactor = self.interactor.clone();
        react(
            |_: &State| Some(()),
            move |()| {
                let interactor = interactor.clone();
                stream::once(async move { interactor.pairs().await })
                    .filter_map(|result| future::ready(loaded(result)))
                    .map(Event::SetPairs)
                    .boxed()
            },
        )
    }

    fn search_query(&self) -> Box<dyn Feedback<State, Event>> {
        let interactor = self.interactor.clone();
        react(
            |_: &State| Some(()),
            move |()| {
                interactor
                    .search_pairs()
                    .take_while(|result| future::ready(result.is_ok()))
                    .filter_map(|result| future::ready(loaded(result)))
                    .map(Event::SetPairs)
                    .boxed()
            },
        )
    }
}

fn loaded(result: Result<Vec<SmartPair>>) -> Option<Vec<SmartPair>> {
    result
        .map_err(|e| warn!("Failed to load market pairs: {}", e))
        .ok()
}

fn run_effect<I>(interactor: &Arc<I>, output: &mpsc::UnboundedSender<InfoPair>, effect: MarketEffect)
where
    I: MarketInteractor + Sync + 'static,
{
    match effect {
        MarketEffect::CheckMark(pair) => {
            let interactor = interactor.clone();
            tokio::spawn(async move {
                if let Err(e) = interactor.check_mark(&pair).await {
                    warn!(pair = %pair.id, "Failed to store checked flag: {}", e);
                }
            });
        }
        MarketEffect::ShowInfo(info) => {
            if output.send(info).is_err() {
                debug!("Market module output is gone");
            }
        }
        MarketEffect::Search(text) => interactor.search_pair(&text),
    }
}
