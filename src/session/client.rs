//! Session facade
//!
//! The single owner of a control connection and everything scoped to it.

use crate::config::{Config, DesyncPolicy};
use crate::error::{BirdError, Result};
use crate::network::{Connector, Transport, UnixConnector};
use crate::protocol::{
    classify, encode_command, validate_command, LineFramer, Reply, ReplyCode, Response,
    RESTRICT_COMMAND,
};
use super::events::{Event, EventKind, ListenerId, Notifiable, Notifier};
use super::queue::{CommandQueue, PendingCommand};
use super::state::{ConnectionState, StateMachine};

/// Outcome of one [`Session::poll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStatus {
    /// This many bytes were read and processed
    Data(usize),

    /// The read timed out with nothing to process
    Idle,

    /// The connection is gone
    Closed,
}

/// Everything scoped to one connection
///
/// Discarded piecewise on close: the framer and queue are cleared, the
/// transport dropped and the state set to `Closed`.
#[derive(Default)]
struct SessionContext {
    state: StateMachine,
    framer: LineFramer,
    queue: CommandQueue,
    transport: Option<Box<dyn Transport>>,
    read_buf: Vec<u8>,
}

/// Client session for the BIRD control socket
///
/// ## Execution Model
///
/// Single-threaded and event-driven. Inbound bytes enter through
/// [`Session::handle_data`] (or [`Session::poll`], which reads from the
/// transport and calls it), transport loss through
/// [`Session::handle_close`]. Command results come back through the
/// callback given to [`Session::command`]; lifecycle changes through
/// [`Notifiable`] listeners. Both receive `&mut Session`, so they can queue
/// further commands or close the session.
///
/// There is no command timeout: a command that never gets a terminal reply
/// holds the queue until the session closes. Closing drops every queued and
/// in-flight command without calling it back.
pub struct Session {
    config: Config,
    connector: Box<dyn Connector>,
    ctx: SessionContext,
    notifier: Notifier<Session>,
}

impl Session {
    /// Create a closed session using the Unix socket connector
    pub fn new(config: Config) -> Self {
        Self::with_connector(config, UnixConnector::new())
    }

    /// Create a closed session with a custom transport connector
    pub fn with_connector(config: Config, connector: impl Connector + 'static) -> Self {
        Self {
            config,
            connector: Box::new(connector),
            ctx: SessionContext::default(),
            notifier: Notifier::new(),
        }
    }

    /// Create a session and open it straight away
    pub fn connect(config: Config) -> Result<Self> {
        let mut session = Self::new(config);
        session.open()?;
        Ok(session)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Connect the transport
    ///
    /// The outcome is reported once through an `open` notification and
    /// returned. On failure the session stays `Closed` and commands queued
    /// while closed are dropped without being called back.
    pub fn open(&mut self) -> Result<()> {
        if self.ctx.transport.is_some() || self.state() != ConnectionState::Closed {
            tracing::warn!("open() called on a session in state {}", self.state());
            return Err(BirdError::AlreadyOpen);
        }

        match self.connector.connect(&self.config) {
            Ok(transport) => {
                self.ctx.transport = Some(transport);
                self.ctx.framer.clear();
                self.ctx.state.connected();
                tracing::info!("Opened {}", self.config.socket_path.display());
                self.emit(Event::Open(None));
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to open {}: {}", self.config.socket_path.display(), e);
                let dropped = self.ctx.queue.clear();
                if dropped > 0 {
                    tracing::warn!("Open failed with {} command(s) abandoned", dropped);
                }
                self.emit(Event::Open(Some(e.clone())));
                Err(e)
            }
        }
    }

    /// Replace the configuration, then [`Session::open`]
    pub fn open_with(&mut self, config: Config) -> Result<()> {
        if self.ctx.transport.is_some() {
            tracing::warn!("open_with() called on an open session");
            return Err(BirdError::AlreadyOpen);
        }
        self.config = config;
        self.open()
    }

    /// Register `on_open` for `open` notifications, then open
    ///
    /// `config`, when given, replaces the current configuration first. The
    /// listener sees this attempt's outcome and stays registered for later
    /// ones until removed with [`Notifiable::off`]. Nothing is registered
    /// if the session is already open.
    pub fn open_with_listener<F>(
        &mut self,
        config: Option<Config>,
        on_open: F,
    ) -> Result<ListenerId>
    where
        F: FnMut(&mut Session, &Event) + 'static,
    {
        if self.ctx.transport.is_some() || self.state() != ConnectionState::Closed {
            tracing::warn!(
                "open_with_listener() called on a session in state {}",
                self.state()
            );
            return Err(BirdError::AlreadyOpen);
        }

        let id = self.on(EventKind::Open, on_open);
        match config {
            Some(config) => self.open_with(config)?,
            None => self.open()?,
        }
        Ok(id)
    }

    /// Close the session
    ///
    /// Only legal while not closed. Fires `close` with no error.
    pub fn close(&mut self) -> Result<()> {
        if self.ctx.transport.is_none() && self.state() == ConnectionState::Closed {
            tracing::warn!("close() called on a closed session");
            return Err(BirdError::NotOpen);
        }
        self.handle_close(None);
        Ok(())
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Queue a command
    ///
    /// `callback` runs exactly once with the daemon's terminal reply, unless
    /// the session closes first. Dispatches immediately when `Ready`.
    pub fn command<F>(&mut self, text: impl Into<String>, callback: F) -> Result<()>
    where
        F: FnOnce(&mut Session, Option<BirdError>, Response) + 'static,
    {
        let text = text.into();
        if let Err(e) = validate_command(&text) {
            tracing::warn!("Rejected command: {}", e);
            return Err(e);
        }

        tracing::trace!("Queued command {:?}", text);
        self.ctx
            .queue
            .push_back(PendingCommand::new(text, Box::new(callback)));

        if self.state() == ConnectionState::Ready {
            self.dispatch_next();
        }
        Ok(())
    }

    /// Send the queue head if the current state allows it
    fn dispatch_next(&mut self) {
        let ctx = &mut self.ctx;
        let Some(command) = ctx.queue.start_next(&mut ctx.state) else {
            return;
        };

        tracing::debug!(">> {}", command.command());
        let bytes = encode_command(command.command());
        let written = match ctx.transport.as_mut() {
            Some(transport) => transport.write_all(&bytes).map_err(BirdError::from),
            None => Err(BirdError::NotOpen),
        };

        if let Err(e) = written {
            tracing::warn!("Failed to send command: {}", e);
            self.handle_close(Some(e));
        }
    }

    // =========================================================================
    // Inbound Events
    // =========================================================================

    /// Read one chunk from the transport and process it
    ///
    /// Blocks until data arrives, the read times out or the peer closes.
    pub fn poll(&mut self) -> Result<PollStatus> {
        let mut buf = std::mem::take(&mut self.ctx.read_buf);
        buf.resize(self.config.read_chunk_size.max(1), 0);

        let result = {
            let transport = match self.ctx.transport.as_mut() {
                Some(transport) => transport,
                None => {
                    self.ctx.read_buf = buf;
                    return Err(BirdError::NotOpen);
                }
            };
            loop {
                match transport.read_chunk(&mut buf) {
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                    other => break other,
                }
            }
        };

        let status = match result {
            Ok(0) => {
                tracing::debug!("Daemon closed the connection");
                self.handle_close(None);
                PollStatus::Closed
            }
            Ok(n) => {
                self.handle_data(&buf[..n]);
                PollStatus::Data(n)
            }
            Err(e)
                if e.kind() == std::io::ErrorKind::WouldBlock
                    || e.kind() == std::io::ErrorKind::TimedOut =>
            {
                PollStatus::Idle
            }
            Err(e) => {
                tracing::warn!("Read failed: {}", e);
                self.handle_close(Some(e.into()));
                PollStatus::Closed
            }
        };

        self.ctx.read_buf = buf;
        Ok(status)
    }

    /// Poll until `done` holds
    ///
    /// Fails with `ConnectionClosed` if the session closes first and with
    /// `Timeout` if a read times out.
    pub fn run_until<P>(&mut self, mut done: P) -> Result<()>
    where
        P: FnMut(&Session) -> bool,
    {
        loop {
            if done(self) {
                return Ok(());
            }
            match self.poll()? {
                PollStatus::Data(_) => {}
                PollStatus::Idle => return Err(BirdError::Timeout),
                PollStatus::Closed => {
                    return if done(self) {
                        Ok(())
                    } else {
                        Err(BirdError::ConnectionClosed)
                    };
                }
            }
        }
    }

    /// Process bytes received from the daemon
    pub fn handle_data(&mut self, chunk: &[u8]) {
        if self.ctx.transport.is_none() {
            tracing::debug!("Dropping {} bytes received while closed", chunk.len());
            return;
        }
        self.ctx.framer.extend(chunk);
        // Closing clears the framer, which ends the loop
        while let Some(line) = self.ctx.framer.next_line() {
            self.handle_line(&line);
        }
    }

    /// The transport went away, `error` says why
    ///
    /// Drops all queued and in-flight commands without calling them back
    /// and fires `close` once.
    pub fn handle_close(&mut self, error: Option<BirdError>) {
        if self.ctx.transport.is_none() && self.state() == ConnectionState::Closed {
            tracing::debug!("Ignoring close of an already closed session");
            return;
        }

        if let Some(mut transport) = self.ctx.transport.take() {
            if let Err(e) = transport.shutdown() {
                tracing::debug!("Transport shutdown failed: {}", e);
            }
        }
        self.ctx.framer.clear();
        let dropped = self.ctx.queue.clear();
        self.ctx.state.closed();

        if dropped > 0 {
            tracing::warn!("Session closed with {} command(s) abandoned", dropped);
        }
        match &error {
            Some(e) => tracing::info!("Session closed: {}", e),
            None => tracing::info!("Session closed"),
        }
        self.emit(Event::Close(error));
    }

    fn handle_line(&mut self, line: &str) {
        tracing::debug!("<< {}", line);

        match classify(line) {
            Reply::Welcome => self.handle_welcome(line),
            Reply::Success(code) => self.complete(code, None),
            Reply::Error(code) => self.complete(code, BirdError::protocol(code)),
            Reply::Data { payload, .. } => match self.ctx.queue.in_flight_mut() {
                Some(command) => command.append(&payload),
                None => self.desync(format!("data line with no command in flight: {:?}", line)),
            },
            Reply::Unparsable(text) => {
                tracing::warn!("Unparsable line: {:?}", text);
            }
        }
    }

    fn handle_welcome(&mut self, line: &str) {
        if !self.ctx.state.welcomed() {
            self.desync(format!("welcome in state {}: {:?}", self.state(), line));
            return;
        }

        self.ctx.queue.push_front(PendingCommand::new(
            RESTRICT_COMMAND,
            Box::new(
                |session: &mut Session, error: Option<BirdError>, _response: Response| match error {
                    Some(e) => session.emit(Event::Error(e)),
                    None => session.emit(Event::Ready),
                },
            ),
        ));
        self.dispatch_next();
    }

    /// Finish the in-flight command with terminal `code`
    fn complete(&mut self, code: ReplyCode, error: Option<BirdError>) {
        let Some(command) = self.ctx.queue.take_in_flight() else {
            self.desync(format!("terminal reply {} with no command in flight", code));
            return;
        };
        self.ctx.state.completed();

        tracing::debug!("Command {:?} finished with {}", command.command(), code);
        command.complete(self, error, code);

        // Callback may have dispatched or closed already
        self.dispatch_next();
    }

    fn desync(&mut self, detail: String) {
        match self.config.desync_policy {
            DesyncPolicy::Warn => tracing::warn!("Protocol desync: {}", detail),
            DesyncPolicy::Fatal => {
                tracing::error!("Protocol desync: {}", detail);
                let error = BirdError::Desync(detail);
                self.emit(Event::Error(error.clone()));
                self.handle_close(Some(error));
            }
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current connection state
    pub fn state(&self) -> ConnectionState {
        self.ctx.state.current()
    }

    /// Set the connection state by name
    ///
    /// Unknown names are rejected and leave the state unchanged.
    pub fn set_state(&mut self, name: &str) -> Result<ConnectionState> {
        self.ctx.state.force(name).inspect_err(|e| {
            tracing::error!("{}", e);
        })
    }

    /// Whether a transport is attached
    pub fn is_open(&self) -> bool {
        self.ctx.transport.is_some()
    }

    /// Commands waiting to be dispatched
    pub fn queued(&self) -> usize {
        self.ctx.queue.len()
    }

    /// Text of the command currently on the wire
    pub fn in_flight(&self) -> Option<&str> {
        self.ctx.queue.in_flight().map(|command| command.command())
    }

    /// Bytes of an unterminated line held back
    pub fn buffered(&self) -> usize {
        self.ctx.framer.len()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Notifiable for Session {
    fn on<F>(&mut self, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(&mut Self, &Event) + 'static,
    {
        self.notifier.subscribe(kind, listener)
    }

    fn off(&mut self, id: ListenerId) -> bool {
        self.notifier.unsubscribe(id)
    }

    fn emit(&mut self, event: Event) {
        tracing::trace!("Emitting {:?}", event.kind());
        let targets = self.notifier.listeners_for(event.kind());
        Notifier::deliver(targets, self, &event);
    }
}
