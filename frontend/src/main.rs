use antennacore::record::{Field, FieldSpec};
use antennacore::{
    EnvType, ImageStatus, MetalObstruction, PredictionView, Predictor, SelectorConfig,
};
use anyhow::Context;
use clap::Parser;
use form::{FormState, StepDirection};
use iced::{
    widget::{
        button, column, image, pick_list, row, scrollable, text, text_input, Column, Container,
        Row,
    },
    Alignment, Element, Length, Task, Theme,
};
use log::warn;
use std::path::PathBuf;
use std::sync::Arc;

mod form;

#[derive(Parser)]
#[command(author, version, about = "Fractal antenna selector form")]
struct Args {
    /// Load model and asset locations from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Model artifact, overrides the config file
    #[arg(long)]
    model: Option<PathBuf>,
    /// Directory containing designs/*.png, overrides the config file
    #[arg(long)]
    assets: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = SelectorConfig::resolve(args.config.as_deref())?
        .with_overrides(args.model, args.assets);
    let predictor = Predictor::from_artifact(&config.model_path, config.catalog())
        .with_context(|| format!("loading model artifact {}", config.model_path.display()))?;
    let predictor = Arc::new(predictor);

    iced::application(
        move || Frontend::boot(predictor.clone()),
        Frontend::update,
        Frontend::view,
    )
    .title(application_title)
    .theme(application_theme)
    .run()
    .map_err(|err| anyhow::anyhow!("running antenna selector window: {err}"))
}

fn application_title(_: &Frontend) -> String {
    "Fractal Antenna Selector".into()
}

fn application_theme(_: &Frontend) -> Theme {
    Theme::Dark
}

struct Frontend {
    predictor: Arc<Predictor>,
    form: FormState,
    outcome: Option<PredictionView>,
    status: String,
}

#[derive(Debug, Clone)]
enum Message {
    EnvSelected(EnvType),
    MetalSelected(MetalObstruction),
    FieldChanged(Field, String),
    Step(Field, StepDirection),
    Submit,
}

impl Frontend {
    fn boot(predictor: Arc<Predictor>) -> (Self, Task<Message>) {
        (
            Frontend {
                predictor,
                form: FormState::default(),
                outcome: None,
                status: String::new(),
            },
            Task::none(),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::EnvSelected(env) => state.form.env = env,
            Message::MetalSelected(metal) => state.form.metal = metal,
            Message::FieldChanged(field, value) => state.form.update_field(field, value),
            Message::Step(field, direction) => state.form.step(field, direction),
            Message::Submit => state.submit(),
        }
        Task::none()
    }

    fn submit(&mut self) {
        let record = match self.form.to_record() {
            Ok(record) => record,
            Err(err) => {
                warn!("form not submitted: {}", err);
                self.status = err;
                // no earlier prediction stays on screen beside a form error
                self.outcome = None;
                return;
            }
        };
        match self.predictor.submit(&record) {
            Ok(view) => {
                self.status = String::new();
                self.outcome = Some(view);
            }
            Err(err) => {
                // model/table mismatch: show it, never fall back to a default design
                self.status = format!("Prediction failed: {err}");
                self.outcome = None;
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let advisories = state.form.advisories().into_iter().fold(
            Column::new().spacing(4),
            |col, advisory| col.push(text(format!("Warning: {}", advisory.message)).size(13)),
        );

        let controls = column![
            text("Fractal Antenna Selector").size(28),
            text("This app predicts the best antenna type based on environment and signal conditions.")
                .size(14),
            labelled(
                "Environment Type",
                pick_list(EnvType::ALL, Some(state.form.env), Message::EnvSelected).into(),
            ),
            numeric_control(&state.form, Field::DistanceM),
            numeric_control(&state.form, Field::NumWalls),
            labelled(
                "Has Metal Obstructions?",
                pick_list(
                    MetalObstruction::ALL,
                    Some(state.form.metal),
                    Message::MetalSelected
                )
                .into(),
            ),
            numeric_control(&state.form, Field::FrequencyMhz),
            advisories,
            button("Predict Best Antenna")
                .on_press(Message::Submit)
                .padding(10),
            text(&state.status).size(14),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fixed(460.0));

        let result = match &state.outcome {
            Some(view) => prediction_panel(view),
            None => column![text("Submit the form to get a recommendation.").size(14)].into(),
        };

        let layout = column![
            row![controls, scrollable(result).width(Length::Fill)]
                .spacing(20)
                .align_y(Alignment::Start),
            text("Developed as part of the AI-based Fractal Antenna Selection project.").size(12),
        ]
        .spacing(16)
        .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

fn labelled<'a>(label: &'a str, control: Element<'a, Message>) -> Element<'a, Message> {
    row![text(label).width(Length::Fixed(180.0)), control]
        .spacing(8)
        .align_y(Alignment::Center)
        .into()
}

fn numeric_control(form: &FormState, field: Field) -> Element<'_, Message> {
    let spec = FieldSpec::spec_for(field);
    let control = row![
        text_input(&spec.default.to_string(), form.text(field))
            .on_input(move |value| Message::FieldChanged(field, value))
            .on_submit(Message::Submit)
            .padding(6)
            .width(Length::Fixed(110.0)),
        button("-").on_press(Message::Step(field, StepDirection::Down)),
        button("+").on_press(Message::Step(field, StepDirection::Up)),
        text(format!("{} to {}", spec.min, spec.max)).size(12),
    ]
    .spacing(6)
    .align_y(Alignment::Center);
    labelled(spec.label, control.into())
}

fn prediction_panel(view: &PredictionView) -> Element<'_, Message> {
    let illustration: Element<'_, Message> = match &view.image {
        ImageStatus::Found(path) => column![
            image(image::Handle::from_path(path)).width(Length::Fill),
            text(view.design.name).size(13),
        ]
        .spacing(4)
        .into(),
        ImageStatus::Missing(_) => text(format!("Warning: {}", view.image)).into(),
    };

    let summary = view
        .summary
        .rows()
        .fold(Row::new().spacing(18), |table, (header, value)| {
            table.push(column![text(header).size(13), text(value.to_string()).size(15)].spacing(4))
        });

    column![
        text(view.banner()).size(22),
        illustration,
        text("Input Summary:").size(18),
        summary,
    ]
    .spacing(12)
    .padding(16)
    .into()
}
