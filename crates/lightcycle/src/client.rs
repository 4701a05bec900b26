//! The client loop: pull messages, apply them, answer ticks.
//!
//! The flow is:
//!   1. Send `join`, then dispatch messages until `game` arrives
//!   2. Loop: pull the next message → update state → call bot hooks
//!   3. `win`/`lose` close the connection and end the loop
//!
//! Everything runs on one task. The only point where the loop waits is
//! the read inside [`Client::pull`].

use std::collections::VecDeque;

use lightcycle_game::{Action, Bot, GameError, GameState};
use lightcycle_protocol::{
    ClientMessage, Codec, Direction, LineCodec, Message, ServerMessage,
};
use lightcycle_transport::{Connection, TcpConnection, TransportError};
use tracing::{Instrument, debug, error, info, warn};

use crate::{ClientConfig, LightcycleError};

/// How a match ended for us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win { wins: u32, losses: u32 },
    Lose { wins: u32, losses: u32 },
}

/// A connected game client driving one [`Bot`].
///
/// Each client owns its connection and its [`GameState`]; running several
/// games at once means running several clients.
pub struct Client<C, B, K = LineCodec> {
    conn: C,
    codec: K,
    bot: B,
    password: String,
    /// Parsed but not yet dispatched messages, oldest first.
    queue: VecDeque<Message>,
    state: GameState,
    outcome: Option<Outcome>,
}

impl<C, B> Client<C, B, LineCodec>
where
    C: Connection<Error = TransportError>,
    B: Bot,
{
    /// Creates a client on an open connection using the line codec.
    pub fn new(
        conn: C,
        bot: B,
        name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::with_codec(conn, bot, name, password, LineCodec)
    }
}

impl<C, B, K> Client<C, B, K>
where
    C: Connection<Error = TransportError>,
    B: Bot,
    K: Codec,
{
    /// Creates a client on an open connection with a custom codec.
    pub fn with_codec(
        conn: C,
        bot: B,
        name: impl Into<String>,
        password: impl Into<String>,
        codec: K,
    ) -> Self {
        Self {
            conn,
            codec,
            bot,
            password: password.into(),
            queue: VecDeque::new(),
            state: GameState::new(name),
            outcome: None,
        }
    }

    /// The current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn bot(&self) -> &B {
        &self.bot
    }

    pub fn connection(&self) -> &C {
        &self.conn
    }

    /// How the match ended, once it has.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Joins and plays one match to the end.
    ///
    /// All log output of the match is wrapped in a span carrying the
    /// connection id.
    pub async fn play(&mut self) -> Result<Outcome, LightcycleError> {
        let span = tracing::info_span!(
            "client",
            conn = %self.conn.id(),
            name = self.state.own_name(),
        );
        async {
            self.join().await?;
            self.run().await
        }
        .instrument(span)
        .await
    }

    /// Sends `join` and dispatches messages until the game starts.
    ///
    /// Messages that arrive in the lobby go through the normal dispatcher,
    /// so a server `error` (wrong password, name taken) aborts here.
    pub async fn join(&mut self) -> Result<(), LightcycleError> {
        info!(name = self.state.own_name(), "joining game");
        let join = ClientMessage::Join {
            name: self.state.own_name().to_string(),
            password: self.password.clone(),
        };
        self.send(&join).await?;

        debug!("waiting for game to start");
        while !self.state.is_joined() && self.outcome.is_none() {
            self.step().await?;
        }
        Ok(())
    }

    /// Dispatches messages until the match is over.
    pub async fn run(&mut self) -> Result<Outcome, LightcycleError> {
        while self.state.is_joined() {
            self.step().await?;
        }
        self.outcome.ok_or(LightcycleError::Game(GameError::NotStarted))
    }

    /// Pulls and dispatches one message. Any error closes the connection.
    async fn step(&mut self) -> Result<(), LightcycleError> {
        let result = match self.pull().await {
            Ok(msg) => self.dispatch(msg).await,
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            debug!(error = %e, "aborting");
            if let Err(close_err) = self.conn.close().await {
                debug!(error = %close_err, "close after error failed");
            }
            self.state.finish();
        }
        result
    }

    /// Returns the oldest undispatched message, reading from the server
    /// when the queue is empty.
    pub async fn pull(&mut self) -> Result<Message, LightcycleError> {
        loop {
            if let Some(msg) = self.queue.pop_front() {
                return Ok(msg);
            }
            let data = self.conn.recv().await?.ok_or_else(|| {
                TransportError::ConnectionClosed("server closed the connection".into())
            })?;
            self.queue.extend(self.codec.decode(&data)?);
        }
    }

    /// Applies one message to the state and calls the matching bot hook.
    pub async fn dispatch(&mut self, msg: Message) -> Result<(), LightcycleError> {
        match ServerMessage::decode(&msg)? {
            ServerMessage::Game { width, height } => {
                self.state.start_game(width, height);
            }
            ServerMessage::Player { id, name } => {
                self.state.register_player(id, &name);
            }
            ServerMessage::Pos { id, x, y } => {
                self.state.place_player(id, x, y)?;
            }
            ServerMessage::Die { id } => {
                let cleared = self.state.clear_trail(id)?;
                debug!(%id, cleared, "trail cleared");
                let player = self.state.player(id)?;
                let action = self.bot.on_die(&self.state, player);
                self.state.remove_player(id)?;
                self.perform(action).await?;
            }
            ServerMessage::Chat { id, text } => {
                let sender = self.state.player(id)?;
                let action = self.bot.on_message(&self.state, sender, &text);
                self.perform(action).await?;
            }
            ServerMessage::Tick => {
                let action = self.bot.on_tick(&self.state);
                if !matches!(action, Action::Move(_)) {
                    warn!(?action, "tick answered without a move");
                }
                self.perform(action).await?;
            }
            ServerMessage::Win { wins, losses } => {
                self.bot.on_win(wins, losses);
                self.finish(Outcome::Win { wins, losses }).await?;
            }
            ServerMessage::Lose { wins, losses } => {
                self.bot.on_lose(wins, losses);
                self.finish(Outcome::Lose { wins, losses }).await?;
            }
            ServerMessage::Error { description } => {
                error!(%description, "server returned error");
                warn!(raw = %msg, "message raw");
                return Err(LightcycleError::Server(description));
            }
            ServerMessage::Unknown(raw) => {
                warn!(kind = raw.kind(), "unknown message type");
                warn!(%raw, "message raw");
            }
        }
        Ok(())
    }

    /// Sends `move|<dir>` and remembers it as our last direction.
    pub async fn send_move(&mut self, dir: Direction) -> Result<(), LightcycleError> {
        self.state.set_last_direction(dir);
        self.send(&ClientMessage::Move(dir)).await
    }

    /// Sends `chat|<text>`.
    pub async fn chat(&mut self, text: impl Into<String>) -> Result<(), LightcycleError> {
        self.send(&ClientMessage::Chat(text.into())).await
    }

    async fn send(&mut self, msg: &ClientMessage) -> Result<(), LightcycleError> {
        let line = Message::from(msg);
        debug!(%line, "send");
        self.conn.send(&self.codec.encode(&line)).await?;
        Ok(())
    }

    async fn perform(&mut self, action: Action) -> Result<(), LightcycleError> {
        match action {
            Action::Move(dir) => self.send_move(dir).await,
            Action::Chat(text) => self.chat(text).await,
            Action::Idle => Ok(()),
        }
    }

    /// Records the outcome, closes the connection, and leaves the game.
    async fn finish(&mut self, outcome: Outcome) -> Result<(), LightcycleError> {
        info!(?outcome, "match over");
        self.outcome = Some(outcome);
        let closed = self.conn.close().await;
        self.state.finish();
        closed?;
        Ok(())
    }
}

impl<B: Bot> Client<TcpConnection, B> {
    /// Opens a TCP connection as described by `config`.
    pub async fn connect(config: &ClientConfig, bot: B) -> Result<Self, LightcycleError> {
        config.validate()?;
        info!(host = %config.host, port = config.port, "connecting");
        let conn = TcpConnection::connect(&config.host, config.port).await?;
        Ok(Self::new(conn, bot, &config.name, &config.password))
    }
}

/// Builder for configuring and connecting a [`Client`].
///
/// # Example
///
/// ```rust,no_run
/// use lightcycle::prelude::*;
///
/// # async fn demo() -> Result<(), LightcycleError> {
/// let mut client = ClientBuilder::new()
///     .name("snail")
///     .password("hunter2")
///     .host("tron.example.org")
///     .connect(Snail::new())
///     .await?;
/// let outcome = client.play().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Creates a builder with default host and port and no credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config.password = password.into();
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Connects to the server and hands the connection to `bot`.
    pub async fn connect<B: Bot>(
        self,
        bot: B,
    ) -> Result<Client<TcpConnection, B>, LightcycleError> {
        Client::connect(&self.config, bot).await
    }
}
