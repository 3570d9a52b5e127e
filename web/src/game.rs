use flashgrid_core::*;
use gloo::timers::callback::Interval;
use std::time::Duration;
use web_time::Instant;
use yew::html::Scope;
use yew::prelude::*;

/// How often the host clock is sampled while a pattern is flashing.
const FRAME_MS: u32 = 100;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Start,
    ToggleCell(CellIndex),
    Submit,
    Next,
    Retry,
    Reset,
    Tick,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub config: SessionConfig,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    index: CellIndex,
    view: CellView,
    #[prop_or_default]
    clickable: bool,
    callback: Callback<CellIndex>,
}

#[function_component(Cell)]
fn cell_component(props: &CellProps) -> Html {
    use CellView::*;

    let CellProps {
        index,
        view,
        clickable,
        callback,
    } = props.clone();
    let class = classes!(
        "cell",
        match view {
            Idle => classes!(),
            Lit => classes!("lit"),
            Selected => classes!("selected"),
            Correct => classes!("correct"),
            Incorrect => classes!("incorrect"),
            Missed => classes!("missed"),
        },
        clickable.then_some("clickable"),
    );

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("cell {} clicked", index);
        callback.emit(index);
    });

    html! {
        <td><button {class} {onclick} disabled={!clickable}/></td>
    }
}

pub(crate) struct GameView {
    session: GameSession,
    last_tick: Instant,
    flash_interval: Option<Interval>,
}

impl GameView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(FRAME_MS, move || link.send_message(Msg::Tick))
    }

    /// Keeps a host interval alive exactly while the session is flashing, dropping it cancels it.
    fn sync_timer(&mut self, ctx: &Context<Self>) {
        let flashing = self.session.phase() == Phase::Flashing;
        match (flashing, self.flash_interval.is_some()) {
            (true, false) => {
                log::trace!("flash interval started");
                self.last_tick = Instant::now();
                self.flash_interval = Some(Self::create_timer(ctx));
            }
            (false, true) => {
                log::trace!("flash interval dropped");
                self.flash_interval = None;
            }
            _ => {}
        }
    }

    /// Milliseconds since the last tick, the sub-millisecond rest carries over to the next one.
    fn take_elapsed(&mut self) -> Millis {
        let elapsed = Instant::now().duration_since(self.last_tick);
        let ms = Millis::try_from(elapsed.as_millis()).unwrap_or(Millis::MAX);
        self.last_tick += Duration::from_millis(ms);
        ms
    }

    fn level_info(&self, snapshot: &SessionSnapshot) -> Html {
        use Phase::*;

        let message = match snapshot.phase {
            Intro => html! {
                <p>{format!(
                    "Watch the pattern carefully. You'll have {} seconds to observe which squares flash.",
                    self.session.config().flash_ticks
                )}</p>
            },
            Flashing => html! {
                <>
                    <p>{"Watch closely..."}</p>
                    <output>{format!("{}s", snapshot.ticks_remaining)}</output>
                </>
            },
            Selecting => html! {
                <p>{"Select the squares that were flashing, then submit your answer."}</p>
            },
            Feedback => html! { <p>{"Review your results below."}</p> },
            Complete => html! {},
        };

        html! {
            <header>
                <h2>{snapshot.level_name}</h2>
                <small>{snapshot.level_description}</small>
                {message}
            </header>
        }
    }

    fn controls(snapshot: &SessionSnapshot, link: &Scope<Self>) -> Html {
        use Phase::*;

        let next_label = if snapshot.is_last_level() {
            "Finish"
        } else {
            "Next Level"
        };
        let primary = match snapshot.phase {
            Intro => html! {
                <button class="start" onclick={link.callback(|_| Msg::Start)}>{"Start Level"}</button>
            },
            Selecting => html! {
                <button class="submit" disabled={!snapshot.has_selection()} onclick={link.callback(|_| Msg::Submit)}>
                    {"Submit Answer"}
                </button>
            },
            Feedback => html! {
                <>
                    <button class="retry" onclick={link.callback(|_| Msg::Retry)}>{"Retry Level"}</button>
                    <button class="next" onclick={link.callback(|_| Msg::Next)}>{next_label}</button>
                </>
            },
            Flashing | Complete => html! {},
        };
        let reset = match snapshot.phase {
            Intro | Complete => html! {},
            Flashing | Selecting | Feedback => html! {
                <button class="reset" onclick={link.callback(|_| Msg::Reset)}>{"Reset Game"}</button>
            },
        };

        html! {
            <footer>
                {primary}
                {reset}
            </footer>
        }
    }

    fn feedback_panel(snapshot: &SessionSnapshot) -> Html {
        let Some(feedback) = snapshot.feedback else {
            return html! {};
        };

        let summary = if feedback.is_perfect() {
            html! { <p class="perfect">{"Perfect! 100% Accuracy"}</p> }
        } else {
            let accuracy = feedback
                .accuracy_percent()
                .map_or_else(|| "-".to_string(), |percent| format!("{}%", percent));
            html! { <p>{format!("Accuracy: {}", accuracy)}</p> }
        };
        let hint = if feedback.is_perfect() {
            html! {}
        } else {
            html! { <aside class="hint"><strong>{"Hint: "}</strong>{snapshot.level_hint}</aside> }
        };
        let points = snapshot
            .level_points
            .map(|points| html! { <p>{format!("+{} points", points)}</p> });

        html! {
            <section class="feedback">
                <ul>
                    <li class="correct">{format!("✓ {} Correct", feedback.correct.len())}</li>
                    <li class="incorrect">{format!("✗ {} Wrong", feedback.incorrect.len())}</li>
                    <li class="missed">{format!("○ {} Missed", feedback.missed.len())}</li>
                </ul>
                {summary}
                {points}
                {hint}
            </section>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let session = GameSession::with_config(ctx.props().config).unwrap_or_else(|err| {
            log::warn!("{}, falling back to defaults", err);
            GameSession::default()
        });
        Self {
            session,
            last_tick: Instant::now(),
            flash_interval: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        log::trace!("msg: {:?}", msg);
        let updated = match msg {
            Start => self.session.start().has_update(),
            ToggleCell(index) => match self.session.toggle_cell(index) {
                Ok(outcome) => outcome.has_update(),
                Err(err) => {
                    log::error!("toggle rejected: {}", err);
                    false
                }
            },
            Submit => self.session.submit().has_update(),
            Next => self.session.next().has_update(),
            Retry => self.session.retry().has_update(),
            Reset => self.session.reset().has_update(),
            Tick => {
                let elapsed = self.take_elapsed();
                self.session.advance(elapsed).has_update()
            }
        };
        self.sync_timer(ctx);
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let snapshot = self.session.snapshot();
        let link = ctx.link();
        let clickable = snapshot.phase.is_interactive();
        let cell_callback = link.callback(Msg::ToggleCell);

        let complete = if snapshot.phase.is_final() {
            html! {
                <dialog open={true}>
                    <h2>{"Congratulations!"}</h2>
                    <p>{format!("You completed all levels with a total score of {}!", snapshot.score)}</p>
                    <button onclick={link.callback(|_| Msg::Reset)}>{"Play Again"}</button>
                </dialog>
            }
        } else {
            html! {}
        };

        html! {
            <div class="flashgrid">
                <nav>
                    <aside>{format!("Level {}/{}", snapshot.level_index + 1, snapshot.level_count)}</aside>
                    <aside>{format!("Score {}", snapshot.score)}</aside>
                </nav>
                {self.level_info(&snapshot)}
                <table>
                    {
                        for (0..GRID_SIDE).map(|row| html! {
                            <tr>
                                {
                                    for (0..GRID_SIDE).map(|col| {
                                        let index = row * GRID_SIDE + col;
                                        let view = snapshot.cell_view(index);
                                        let callback = cell_callback.clone();
                                        html! {
                                            <Cell {index} {view} {clickable} {callback}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                {Self::controls(&snapshot, link)}
                {Self::feedback_panel(&snapshot)}
                {complete}
            </div>
        }
    }
}
