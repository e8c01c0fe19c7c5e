// src/bin/ticket.rs

use eframe::egui;
use egui::{Color32, FontId, Frame, RichText, Stroke};
use egui_plot::{Line, Plot, PlotPoints};
use log::{error, info};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use stockbrokr::config::PRICE_HISTORY_LEN;
use stockbrokr::logging::init_logging;
use stockbrokr::snapshot::{load_accounts, save_accounts};
use stockbrokr::{
    Accounts, AppConfig, Document, LiveTotalCalculator, LoginForm, Page, QuoteBoard, QuoteTicker,
    RegistrationForm, Side, StockUniverse, TicketBindings, TradingDesk, UiEvent,
};

struct TicketApp {
    // World state
    desk: TradingDesk,
    page: Page,
    bindings: TicketBindings,
    _ticker: QuoteTicker,
    snapshot_path: PathBuf,

    // Selected stock and its recent prices
    selected: String,
    history: VecDeque<f64>,
    last_sample: Instant,
    sample_every: Duration,

    // Form buffers
    login_form: LoginForm,
    registration_form: RegistrationForm,
    lookup_input: String,
    shares_input: String,
    message: Option<(String, bool)>,
}

impl eframe::App for TicketApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Publish the latest quote into the "current" element. This alone does not
        // touch the total: only a key release in the shares field does.
        let price = self.desk.board().price(&self.selected);
        let price_text = price.map(|p| format!("{:.2}", p)).unwrap_or_default();
        self.page.document_mut().set_text(&self.bindings.current, price_text.clone());

        if self.last_sample.elapsed() >= self.sample_every {
            if let Some(p) = price {
                if self.history.len() == PRICE_HISTORY_LEN {
                    self.history.pop_front();
                }
                self.history.push_back(p);
            }
            self.last_sample = Instant::now();
        }
        ctx.request_repaint_after(self.sample_every);

        if self.desk.current_user().is_none() {
            egui::CentralPanel::default().show(ctx, |ui| self.sign_in_panel(ui));
            return;
        }

        egui::TopBottomPanel::bottom("portfolio").show(ctx, |ui| self.portfolio_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Stockbrokr");
                let name = self.desk.current_user().map(|u| u.full_name()).unwrap_or_default();
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Log out").clicked() {
                        self.desk.logout();
                        self.message = None;
                    }
                    ui.label(name);
                });
            });
            ui.add_space(4.0);

            // --- Lookup form ---
            ui.horizontal(|ui| {
                ui.label("Ticker symbol:");
                let resp = ui.add(egui::TextEdit::singleline(&mut self.lookup_input).desired_width(100.0));
                let submitted = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Look up").clicked() || submitted {
                    self.look_up();
                }
            });
            ui.separator();

            // --- The ticket ---
            Frame::dark_canvas(ui.style())
                .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                .show(ui, |ui| {
                    let company = self
                        .desk
                        .universe()
                        .get(&self.selected)
                        .map(|s| s.company_name.clone())
                        .unwrap_or_default();
                    ui.label(RichText::new(format!("{} ({})", company, self.selected)).strong());

                    let big_font = FontId::monospace(18.0);
                    egui::Grid::new("ticket_grid").num_columns(2).spacing([20.0, 6.0]).show(ui, |ui| {
                        ui.label("Current price:");
                        ui.label(RichText::new(&price_text).font(big_font.clone()).color(Color32::LIGHT_GREEN));
                        ui.end_row();

                        ui.label("Shares:");
                        let resp = ui.add(egui::TextEdit::singleline(&mut self.shares_input).desired_width(100.0));
                        if resp.has_focus() {
                            self.forward_key_releases(ctx);
                        }
                        ui.end_row();

                        ui.label("Total:");
                        let total = self.page.document().text(&self.bindings.total).unwrap_or_default();
                        ui.label(RichText::new(total).font(big_font.clone()));
                        ui.end_row();
                    });

                    ui.horizontal(|ui| {
                        if ui.button("Buy shares").clicked() {
                            self.place(Side::Buy);
                        }
                        if ui.button("Sell shares").clicked() {
                            self.place(Side::Sell);
                        }
                    });

                    self.show_message(ui);
                });
            ui.add_space(4.0);

            let ys: Vec<f64> = self.history.iter().copied().collect();
            Frame::dark_canvas(ui.style()).show(ui, |ui| {
                Plot::new("price_plot")
                    .height(ui.available_height())
                    .width(ui.available_width())
                    .show(ui, |plot_ui| {
                        let line = Line::new(PlotPoints::from_ys_f64(&ys))
                            .color(Color32::LIGHT_BLUE)
                            .stroke(Stroke::new(2.0, Color32::LIGHT_BLUE))
                            .name(&self.selected);
                        plot_ui.line(line);
                    });
            });
        });
    }
}

impl TicketApp {
    fn show_message(&self, ui: &mut egui::Ui) {
        if let Some((text, ok)) = &self.message {
            let color = if *ok { Color32::LIGHT_GREEN } else { Color32::LIGHT_RED };
            ui.label(RichText::new(text).color(color));
        }
    }

    /// Login form, with registration folded underneath.
    fn sign_in_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Stockbrokr");
        ui.add_space(8.0);

        egui::Grid::new("login_grid").num_columns(2).spacing([20.0, 6.0]).show(ui, |ui| {
            ui.label("Email:");
            ui.text_edit_singleline(&mut self.login_form.email);
            ui.end_row();
            ui.label("Password:");
            ui.add(egui::TextEdit::singleline(&mut self.login_form.password).password(true));
            ui.end_row();
        });
        if ui.button("Log in").clicked() {
            self.log_in();
        }
        ui.add_space(8.0);

        egui::CollapsingHeader::new("Create an account").show(ui, |ui| {
            let form = &mut self.registration_form;
            egui::Grid::new("register_grid").num_columns(2).spacing([20.0, 6.0]).show(ui, |ui| {
                ui.label("First name:");
                ui.text_edit_singleline(&mut form.first_name);
                ui.end_row();
                ui.label("Last name:");
                ui.text_edit_singleline(&mut form.last_name);
                ui.end_row();
                ui.label("Email:");
                ui.text_edit_singleline(&mut form.email);
                ui.end_row();
                ui.label("Password:");
                ui.add(egui::TextEdit::singleline(&mut form.password).password(true));
                ui.end_row();
                ui.label("Repeat password:");
                ui.add(egui::TextEdit::singleline(&mut form.confirm).password(true));
                ui.end_row();
            });
            if ui.button("Register").clicked() {
                self.register();
            }
        });

        ui.add_space(8.0);
        self.show_message(ui);
    }

    fn log_in(&mut self) {
        let result = self.desk.login(&self.login_form).map(|u| u.full_name());
        self.message = Some(match result {
            Ok(name) => {
                self.login_form = LoginForm::default();
                (format!("Welcome, {}", name), true)
            }
            Err(e) => (e.to_string(), false),
        });
    }

    fn register(&mut self) {
        self.message = Some(match self.desk.register(&self.registration_form) {
            Ok(_) => {
                self.login_form.email = self.registration_form.email.trim().to_string();
                self.registration_form = RegistrationForm::default();
                match self.persist() {
                    Ok(()) => ("Account created, please log in".to_string(), true),
                    Err(e) => (e.to_string(), false),
                }
            }
            Err(e) => (e.to_string(), false),
        });
    }

    /// Write-through: every change to an account lands on disk straight away.
    fn persist(&self) -> stockbrokr::Result<()> {
        save_accounts(&self.snapshot_path, self.desk.accounts()).map_err(|e| {
            error!("could not save {}: {}", self.snapshot_path.display(), e);
            e
        })
    }

    /// Copies the field into the document and fires one key-up per released key.
    fn forward_key_releases(&mut self, ctx: &egui::Context) {
        let released: Vec<&'static str> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::Key { key, pressed: false, .. } => Some(key.name()),
                    _ => None,
                })
                .collect()
        });
        if released.is_empty() {
            return;
        }
        self.page
            .document_mut()
            .set_value(&self.bindings.shares, self.shares_input.clone());
        for key in released {
            self.page.fire(UiEvent::key_up(self.bindings.shares.clone(), key));
        }
    }

    fn look_up(&mut self) {
        match self.desk.lookup(&self.lookup_input) {
            Ok(stock) => {
                self.selected = stock.ticker.clone();
                self.history.clear();
                self.message = None;
            }
            Err(e) => self.message = Some((e.to_string(), false)),
        }
    }

    fn place(&mut self, side: Side) {
        let selected = self.selected.clone();
        let placed = self.desk.place(side, &selected, &self.shares_input);
        self.message = Some(match placed.and_then(|fill| self.persist().map(|()| fill)) {
            Ok(fill) => (
                format!("{:?} {} {} at ${:.2}", fill.side, fill.shares, fill.ticker, fill.price as f64 / 100.0),
                true,
            ),
            Err(e) => (e.to_string(), false),
        });
    }

    fn portfolio_panel(&self, ui: &mut egui::Ui) {
        let Some(portfolio) = self.desk.portfolio() else {
            return;
        };
        let quotes = self.desk.board().snapshot();
        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("Cash: ${:.2}", portfolio.balance_cents() as f64 / 100.0)).strong());
            ui.add_space(20.0);
            ui.label(format!("Holdings value: ${:.2}", portfolio.market_value(&quotes)));
        });
        egui::Grid::new("holdings_grid").num_columns(2).spacing([20.0, 2.0]).show(ui, |ui| {
            for (ticker, qty) in portfolio.holdings() {
                ui.label(ticker);
                ui.label(qty.to_string());
                ui.end_row();
            }
        });
    }
}

/// Config first, then whatever accounts were saved last time.
fn startup() -> stockbrokr::Result<(AppConfig, Accounts)> {
    let config = AppConfig::from_env()?;
    let accounts = load_accounts(&config.snapshot_path, config.starting_balance_cents)?;
    Ok((config, accounts))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let (config, accounts) = startup().map_err(|e| {
        error!("{}", e);
        e
    })?;
    let universe = StockUniverse::default();
    let board = QuoteBoard::seeded(&universe);
    let ticker = board.spawn_ticker(&universe, config.quotes);

    let selected = universe.tickers().first().cloned().unwrap_or_default();
    let opening = board.price(&selected).map(|p| format!("{:.2}", p)).unwrap_or_default();

    let mut page = Page::new(Document::trading_ticket(&config.bindings, &opening));
    LiveTotalCalculator::new(config.bindings.clone()).attach(&mut page);

    let app_state = TicketApp {
        desk: TradingDesk::new(universe, board, accounts),
        page,
        bindings: config.bindings.clone(),
        _ticker: ticker,
        snapshot_path: config.snapshot_path.clone(),
        login_form: LoginForm::default(),
        registration_form: RegistrationForm::default(),
        lookup_input: selected.clone(),
        selected,
        history: VecDeque::with_capacity(PRICE_HISTORY_LEN),
        last_sample: Instant::now(),
        sample_every: config.quotes.tick_interval(),
        shares_input: String::new(),
        message: None,
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 720.0])
            .with_title("Stockbrokr Ticket"),
        ..Default::default()
    };

    info!("opening ticket window");
    eframe::run_native(
        "Stockbrokr Ticket",
        native_options,
        Box::new(|_cc| {
            let mut app = app_state;
            // The window exists: the document is loaded, bind the listeners.
            app.page.finish_loading();
            let app: Box<dyn eframe::App> = Box::new(app);
            app
        }),
    )?;
    Ok(())
}
