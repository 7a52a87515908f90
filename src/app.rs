use crate::analysis::Analysis;
use crate::completion::{Analyzer, OpenAiClient};
use crate::config::Config;
use crate::error::Result;
use crate::presentation::egui_view;
use crate::prompt_io::{load_prompts, save_prompts};
use crate::types::analysis_data::{AnalysisResponse, PromptConfig};
use eframe::{egui, App};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

pub struct SentenceLensApp {
    config: Config,
    config_error: Option<String>,
    prompts: PromptConfig,
    prompt_draft: PromptConfig,
    prompt_status: Option<Result<String>>,
    sentence_input: String,
    pending: Option<Receiver<Result<AnalysisResponse>>>,
    response: Option<AnalysisResponse>,
    analysis: Option<Analysis>,
    analysis_error: Option<String>,
    show_prompt_editor: bool,
}

impl SentenceLensApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config, config_error: Option<String>) -> Self {
        let (prompts, prompt_status) = match load_prompts(&config.prompt_file) {
            Ok(prompts) => (prompts, None),
            Err(e) => {
                log::error!("Could not load prompts from {}: {}", config.prompt_file.display(), e);
                (PromptConfig::default(), Some(Err(e)))
            }
        };

        Self {
            config,
            config_error,
            prompt_draft: prompts.clone(),
            prompts,
            prompt_status,
            sentence_input: String::new(),
            pending: None,
            response: None,
            analysis: None,
            analysis_error: None,
            show_prompt_editor: false,
        }
    }

    fn reset_results(&mut self) {
        self.response = None;
        self.analysis = None;
        self.analysis_error = None;
    }

    fn start_analysis(&mut self, ctx: &egui::Context) {
        self.reset_results();

        let client = match OpenAiClient::from_config(&self.config) {
            Ok(client) => client,
            Err(e) => {
                self.analysis_error = Some(e.to_string());
                return;
            }
        };
        let analyzer = Analyzer::new(client, self.prompts.clone());
        let sentence = self.sentence_input.clone();
        let (tx, rx) = mpsc::channel();
        let ctx = ctx.clone();

        thread::spawn(move || {
            let result = analyzer.analyze(&sentence);
            if tx.send(result).is_err() {
                log::debug!("Analysis finished after the window closed");
                return;
            }
            ctx.request_repaint();
        });
        self.pending = Some(rx);
    }

    fn poll_pending(&mut self) {
        let Some(rx) = &self.pending else { return };
        match rx.try_recv() {
            Ok(Ok(response)) => {
                self.analysis = (!response.is_raw_only()).then(|| Analysis::from(&response));
                self.response = Some(response);
                self.pending = None;
            }
            Ok(Err(e)) => {
                self.analysis_error = Some(e.to_string());
                self.pending = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.analysis_error = Some("analysis worker stopped unexpectedly".to_string());
                self.pending = None;
            }
        }
    }

    fn save_prompt_draft(&mut self) {
        match save_prompts(&self.prompt_draft, &self.config.prompt_file) {
            Ok(()) => {
                self.prompts = self.prompt_draft.clone();
                self.prompt_status = Some(Ok("Prompts saved.".to_string()));
            }
            Err(e) => self.prompt_status = Some(Err(e)),
        }
    }

    fn prompt_editor(&mut self, ui: &mut egui::Ui) {
        ui.heading("Prompts");
        ui.separator();
        ui.label("System prompt");
        ui.add(
            egui::TextEdit::multiline(&mut self.prompt_draft.system_prompt)
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );
        ui.label("User prompt ({sentence} is replaced by the input)");
        egui::ScrollArea::vertical()
            .id_source("user_prompt_scroll")
            .max_height(400.0)
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut self.prompt_draft.user_prompt)
                        .font(egui::TextStyle::Monospace)
                        .desired_rows(16)
                        .desired_width(f32::INFINITY),
                );
            });
        ui.horizontal(|ui| {
            if ui.button("Save").clicked() {
                self.save_prompt_draft();
            }
            if ui.button("Reset to defaults").clicked() {
                self.prompt_draft = PromptConfig::default();
            }
        });
        match &self.prompt_status {
            Some(Ok(msg)) => {
                ui.colored_label(egui::Color32::GREEN, msg);
            }
            Some(Err(e)) => {
                ui.colored_label(egui::Color32::RED, e.to_string());
            }
            None => {}
        }
    }

    fn results(&self, ui: &mut egui::Ui) {
        if let Some(err) = &self.analysis_error {
            ui.colored_label(egui::Color32::RED, format!("Error: {}", err));
            return;
        }
        let Some(response) = &self.response else {
            if self.pending.is_some() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Analyzing...");
                });
            } else {
                ui.label("Enter a sentence and press Analyze.");
            }
            return;
        };

        match (&self.analysis, &response.raw_response) {
            (Some(analysis), _) => {
                ui.label(egui::RichText::new("Original sentence:").strong());
                ui.label(egui::RichText::new(&analysis.sentence).size(18.0));
                ui.add_space(12.0);
                ui.label(egui::RichText::new("Visualization:").strong());
                ui.add_space(24.0);
                egui_view::show_visualization(ui, analysis);
                ui.add_space(24.0);
                egui_view::show_legend(ui);
                ui.separator();
                egui_view::show_groups(ui, &analysis.groups);
            }
            (None, Some(raw)) => egui_view::show_raw_response(ui, &response.sentence, raw),
            (None, None) => {
                ui.label("The model returned nothing to show.");
            }
        }
    }
}

impl App for SentenceLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_pending();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_prompt_editor, "Prompt editor");
                });
            });
        });

        if self.show_prompt_editor {
            egui::SidePanel::right("prompt_panel")
                .min_width(300.0)
                .default_width(450.0)
                .show(ctx, |ui| self.prompt_editor(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Sentence structure analyzer");
            if let Some(err) = &self.config_error {
                ui.colored_label(egui::Color32::RED, format!("Config: {}", err));
            }
            ui.separator();

            let busy = self.pending.is_some();
            ui.horizontal(|ui| {
                let input = ui.add(
                    egui::TextEdit::singleline(&mut self.sentence_input)
                        .hint_text("e.g. They elected him president.")
                        .desired_width(600.0),
                );
                let submitted = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                let clicked = ui
                    .add_enabled(!busy, egui::Button::new("Analyze"))
                    .clicked();
                if (clicked || submitted) && !busy {
                    self.start_analysis(ctx);
                }
            });
            ui.separator();

            egui::ScrollArea::vertical()
                .id_source("results_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| self.results(ui));
        });
    }
}
