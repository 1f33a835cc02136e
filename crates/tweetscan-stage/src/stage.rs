//! The search stage: one fetch per run, one output row per status

use crate::config::StageConfig;
use crate::descriptor::decode_descriptor;
use crate::error::{Result, StageError};
use crate::metrics::StageMetrics;
use crate::run_state::StageRunState;
use std::fmt::Display;
use tracing::{debug, error, info, info_span, warn};
use tweetscan_domain::traits::{RowStream, SearchClient, Step};
use tweetscan_domain::{Row, RowShape, RunId, StageState};
use tweetscan_extractor::{emit_record, extract_entities, parse_search_response, ParseOutcome};

/// Pipeline step that runs a single search and emits one row per status
///
/// The first `process_row` call pulls one input row, decodes the
/// connection descriptor from its field 0, runs the search and pushes the
/// rows downstream. It then signals output done, and the step never asks
/// for another input row.
///
/// # Examples
///
/// ```
/// use tweetscan_client::MockSearchClient;
/// use tweetscan_domain::{FieldMeta, FieldValue, Row, RowShape, StageState};
/// use tweetscan_stage::{run_step, MemoryRowStream, SearchStage};
///
/// let body = r#"{
///     "statuses": [{"id_str": "1", "text": "hi @bob", "user": {"id_str": "2", "friends_count": 3}}],
///     "search_metadata": {"query": "bob"}
/// }"#;
/// let params = r#"{"consumerKey": "k", "consumerSecret": "s", "applicationName": "a",
///                  "endPointAuthUrl": "https://auth", "endPointUrl": "https://search",
///                  "searchTerm": "bob"}"#;
///
/// let shape = RowShape::new(vec![FieldMeta::string("params")]);
/// let mut stream = MemoryRowStream::with_rows(shape, vec![Row::new(vec![FieldValue::from(params)])]);
/// let mut stage = SearchStage::with_defaults(MockSearchClient::new(body));
///
/// run_step(&mut stage, &mut stream);
///
/// assert_eq!(stage.state(), StageState::Disposed);
/// assert_eq!(stream.output_rows().len(), 1);
/// ```
pub struct SearchStage<C: SearchClient> {
    client: C,
    config: StageConfig,
    run_id: RunId,
    state: StageState,
    run_state: StageRunState,
    metrics: StageMetrics,
    failure: Option<StageError>,
    connection_open: bool,
}

impl<C: SearchClient> SearchStage<C> {
    /// Create a stage around a fetch collaborator
    pub fn new(client: C, config: StageConfig) -> Self {
        Self {
            client,
            config,
            run_id: RunId::new(),
            state: StageState::Created,
            run_state: StageRunState::new(),
            metrics: StageMetrics::new(),
            failure: None,
            connection_open: false,
        }
    }

    /// Create a stage with default configuration
    pub fn with_defaults(client: C) -> Self {
        Self::new(client, StageConfig::default())
    }

    /// Current lifecycle state
    pub fn state(&self) -> StageState {
        self.state
    }

    /// The error that ended the run, if it failed
    pub fn failure(&self) -> Option<&StageError> {
        self.failure.as_ref()
    }

    /// Counters for this run
    pub fn metrics(&self) -> &StageMetrics {
        &self.metrics
    }

    /// Identifier of this run
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Output shape, once resolved by the first call
    pub fn output_shape(&self) -> Option<&RowShape> {
        self.run_state.layout().map(|layout| layout.shape())
    }

    /// The fetch collaborator
    pub fn client(&self) -> &C {
        &self.client
    }

    /// The configuration in use
    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    fn transition(&mut self, next: StageState) -> bool {
        if self.state.can_transition_to(next) {
            debug!("State {} -> {}", self.state, next);
            self.state = next;
            true
        } else {
            warn!("Rejected state transition {} -> {}", self.state, next);
            false
        }
    }

    fn fail(&mut self, err: StageError) {
        error!("Search stage failed: {}", err);
        self.transition(StageState::Failed);
        self.failure = Some(err);
    }
}

impl<C> SearchStage<C>
where
    C: SearchClient,
    C::Error: Display,
{
    fn fetch_and_emit<S>(&mut self, stream: &mut S, input: &Row) -> Result<()>
    where
        S: RowStream,
        S::Error: Display,
    {
        if self
            .run_state
            .resolve_layout(stream.input_shape(), &self.config.fields)
        {
            self.metrics.record_shape_resolution();
        }

        let descriptor = decode_descriptor(input)?;
        debug!(
            "Searching '{}' at {} (auth: {})",
            descriptor.search_term(),
            descriptor.search_endpoint(),
            descriptor.auth_endpoint()
        );

        self.client
            .open(descriptor.credentials())
            .map_err(|e| StageError::Fetch(format!("Failed to open connection: {}", e)))?;
        self.connection_open = true;

        self.metrics.record_fetch();
        let body = self
            .client
            .search(descriptor.search_endpoint(), descriptor.search_term())
            .map_err(|e| StageError::Fetch(format!("Search failed: {}", e)))?;

        let parsed = match parse_search_response(body.as_deref())? {
            ParseOutcome::Empty => {
                info!("Search for '{}' returned no results", descriptor.search_term());
                return Ok(());
            }
            ParseOutcome::Parsed(parsed) => parsed,
        };
        self.metrics.record_skipped(parsed.skipped.len());

        let layout = self.run_state.layout().ok_or_else(|| {
            StageError::Host("Output shape was not resolved".to_string())
        })?;

        for item in &parsed.items {
            let extraction = extract_entities(&item.text);
            let row = emit_record(item, &extraction, input, layout);
            stream
                .put_row(layout.shape(), row)
                .map_err(|e| StageError::Host(e.to_string()))?;
            self.metrics.record_row_written();

            if self.config.feedback_due(self.metrics.rows_written) {
                info!(
                    "Progress: {} rows read, {} rows written",
                    self.metrics.rows_read, self.metrics.rows_written
                );
            }
        }

        Ok(())
    }

    fn first_call<S>(&mut self, stream: &mut S)
    where
        S: RowStream,
        S::Error: Display,
    {
        let Some(input) = stream.get_row() else {
            info!("No input rows; nothing to search");
            stream.set_output_done();
            self.transition(StageState::Done);
            return;
        };
        self.metrics.record_row_read();
        self.transition(StageState::Running);

        match self.fetch_and_emit(stream, &input) {
            Ok(()) => {
                info!(
                    "Search stage finished: {} rows written, {} entries skipped",
                    self.metrics.rows_written, self.metrics.entries_skipped
                );
                self.transition(StageState::Done);
            }
            Err(e) => self.fail(e),
        }

        stream.set_output_done();
    }
}

impl<C, S> Step<S> for SearchStage<C>
where
    C: SearchClient,
    C::Error: Display,
    S: RowStream,
    S::Error: Display,
{
    fn init(&mut self, stream: &mut S) -> bool {
        let span = info_span!("search_stage", run_id = %self.run_id);
        let _guard = span.enter();

        if self.state != StageState::Created {
            warn!("init called in state {}", self.state);
            return false;
        }

        if let Err(e) = stream.begin() {
            self.fail(StageError::HostInit(e.to_string()));
            return false;
        }

        if let Err(e) = self.config.validate_for_input(stream.input_shape()) {
            self.fail(StageError::Configuration(e.to_string()));
            return false;
        }

        self.run_state.mark_initialized();
        self.transition(StageState::Initialized);
        info!("Search stage initialized");
        true
    }

    fn process_row(&mut self, stream: &mut S) -> bool {
        let span = info_span!("search_stage", run_id = %self.run_id);
        let _guard = span.enter();

        if self.state.is_terminal() {
            debug!("Run already {}; no more rows", self.state);
            return false;
        }
        if !self.run_state.is_initialized() || !self.run_state.take_first_call() {
            warn!("process_row called in state {}; ignoring", self.state);
            return false;
        }

        self.first_call(stream);
        false
    }

    fn dispose(&mut self, _stream: &mut S) {
        let span = info_span!("search_stage", run_id = %self.run_id);
        let _guard = span.enter();

        if self.state == StageState::Disposed {
            debug!("dispose called again; nothing to release");
            return;
        }

        if self.connection_open {
            self.client.close();
            self.connection_open = false;
            debug!("Search connection closed");
        }

        self.transition(StageState::Disposed);
        info!("Search stage disposed\n{}", self.metrics.summary());
    }
}
