use crate::game;
use crate::utils::*;
use game::{CellFlags, CellIndex, RevealPhase};
use gloo::timers::callback::Timeout;
use web_time::Instant;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Select(CellIndex),
    Tick,
    NewGame,
    Reset,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    index: CellIndex,
    flags: CellFlags,
    phase: RevealPhase,
    #[prop_or_default]
    enabled: bool,
    callback: Callback<CellIndex>,
}

#[function_component(Cell)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        index,
        flags,
        phase,
        enabled,
        callback,
    } = props.clone();

    let mut class = classes!("cell");
    if flags.contains(CellFlags::FLASHING) {
        class.push(classes!(
            "flashing",
            match phase {
                RevealPhase::Hidden => None,
                RevealPhase::FlipIn => Some("flip-in"),
                RevealPhase::Shown => Some("shown"),
                RevealPhase::FlipOut => Some("flip-out"),
            }
        ));
    }
    if flags.contains(CellFlags::SELECTED) {
        class.push(if flags.contains(CellFlags::WRONG) {
            "wrong"
        } else {
            "selected"
        });
    }
    if flags.contains(CellFlags::SELECTING) {
        class.push("selecting");
    }
    if flags.contains(CellFlags::ERROR_FLASH) {
        class.push("error");
    }
    if flags.contains(CellFlags::TARGET) {
        class.push("target");
    }

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("cell {} click", index);
        callback.emit(index);
    });

    html! {
        <button {class} {onclick} disabled={!enabled}/>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub config: game::EngineConfig,
    pub seed: u64,
}

pub(crate) struct GameView {
    engine: game::PlayEngine,
    last_sync: Instant,
    pending_tick: Option<Timeout>,
}

impl GameView {
    /// Catches the engine clock up with wall time.
    fn sync_clock(&mut self) -> bool {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_sync);
        self.last_sync = now;
        self.engine.advance(elapsed).has_update()
    }

    /// Aims a single timeout at the engine's next deadline, dropping the old
    /// one cancels it.
    fn rearm(&mut self, ctx: &Context<Self>) {
        self.pending_tick = self.engine.time_to_next_task().map(|delay| {
            let link = ctx.link().clone();
            Timeout::new(timeout_millis(delay), move || link.send_message(Msg::Tick))
        });
    }

    fn select(&mut self, index: CellIndex) -> bool {
        match self.engine.select_square(index) {
            Ok(outcome) if outcome.ends_attempt() => {
                log::debug!("select {} ended the attempt: {:?}", index, outcome);
                true
            }
            Ok(outcome) => {
                log::trace!("select {}: {:?}", index, outcome);
                true
            }
            Err(err) => {
                log::debug!("select {} ignored: {}", index, err);
                false
            }
        }
    }

    fn view_header(&self, snapshot: &game::Snapshot) -> Html {
        html! {
            <header>
                <h1>{"Memory Game"}</h1>
                <nav>
                    <aside>{format!("Level {}", snapshot.level)}</aside>
                    <span>
                        {
                            for (1..=game::MAX_LIVES).map(|heart| html! {
                                <i class={classes!("heart", (heart <= snapshot.lives).then_some("filled"))}/>
                            })
                        }
                    </span>
                </nav>
            </header>
        }
    }

    fn view_board(&self, ctx: &Context<Self>, snapshot: &game::Snapshot) -> Html {
        let enabled = snapshot.accepts_input();
        let callback = ctx.link().callback(Msg::Select);
        let style = format!("grid-template-columns: repeat({}, minmax(0, 1fr));", snapshot.grid_size);
        let state_class = match snapshot.state {
            game::GameState::Showing => "showing",
            game::GameState::Playing => "playing",
            game::GameState::LevelComplete => "level-complete",
            _ => "idle",
        };

        html! {
            <section class={classes!("board", state_class)}>
                <p>{status_text(snapshot)}</p>
                <div class="grid" {style}>
                    {
                        for (0..snapshot.total_cells()).map(|index| {
                            let flags = snapshot.cell_flags(index);
                            let phase = snapshot.reveal_phase;
                            let callback = callback.clone();
                            html! {
                                <Cell key={index} {index} {flags} {phase} {enabled} {callback}/>
                            }
                        })
                    }
                </div>
                <footer>
                    <button onclick={ctx.link().callback(|_| Msg::Reset)}>{"Reset Game"}</button>
                </footer>
            </section>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let GameProps { config, seed } = ctx.props().clone();
        log::debug!("seed: {}", seed);
        Self {
            engine: game::PlayEngine::new(config, seed),
            last_sync: Instant::now(),
            pending_tick: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let synced = self.sync_clock();
        let updated = match msg {
            Tick => false,
            Select(index) => self.select(index),
            NewGame => {
                self.engine.start_new_game();
                true
            }
            Reset => {
                self.engine.reset_game();
                true
            }
        };
        self.rearm(ctx);
        synced || updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let snapshot = self.engine.snapshot();
        let body = match snapshot.state {
            game::GameState::Start => html! {
                <section class="welcome">
                    <h2>{"Welcome to Memory Game!"}</h2>
                    <p>{status_text(&snapshot)}</p>
                    <button onclick={ctx.link().callback(|_| NewGame)}>{"Start Game"}</button>
                </section>
            },
            state if state.shows_board() => self.view_board(ctx, &snapshot),
            _ => html! {
                <section class="game-over">
                    <h2>{"Game Over!"}</h2>
                    <p>{status_text(&snapshot)}</p>
                    <button onclick={ctx.link().callback(|_| NewGame)}>{"Play Again"}</button>
                    <button onclick={ctx.link().callback(|_| Reset)}>{"Main Menu"}</button>
                </section>
            },
        };

        html! {
            <div class="memora">
                {self.view_header(&snapshot)}
                {body}
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.pending_tick.take();
        self.engine.teardown();
    }
}
