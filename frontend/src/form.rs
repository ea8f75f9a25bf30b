use antennacore::record::{parse_finite, Advisory, Field, FieldSpec};
use antennacore::{EnvType, InputRecord, MetalObstruction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Down,
    Up,
}

/// Current widget values. Numeric fields stay as typed text until submit.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub env: EnvType,
    pub distance: String,
    pub walls: String,
    pub metal: MetalObstruction,
    pub frequency: String,
}

impl Default for FormState {
    fn default() -> Self {
        let record = InputRecord::default();
        Self {
            env: record.env_type,
            distance: format_value(Field::DistanceM, record.distance_m),
            walls: record.num_walls.to_string(),
            metal: MetalObstruction::from(record.has_metal),
            frequency: format_value(Field::FrequencyMhz, record.frequency_mhz),
        }
    }
}

impl FormState {
    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::DistanceM => &self.distance,
            Field::NumWalls => &self.walls,
            Field::FrequencyMhz => &self.frequency,
        }
    }

    pub fn update_field(&mut self, field: Field, value: String) {
        match field {
            Field::DistanceM => self.distance = value,
            Field::NumWalls => self.walls = value,
            Field::FrequencyMhz => self.frequency = value,
        }
    }

    /// Nudges a field by its declared step. Unparsable text restarts from
    /// the field default; nothing is clamped.
    pub fn step(&mut self, field: Field, direction: StepDirection) {
        let spec = FieldSpec::spec_for(field);
        let current = parse_value(field, self.text(field)).unwrap_or(spec.default);
        let next = match direction {
            StepDirection::Up => current + spec.step,
            StepDirection::Down => current - spec.step,
        };
        self.update_field(field, format_value(field, next));
    }

    /// Assembles the record on submit.
    pub fn to_record(&self) -> Result<InputRecord, String> {
        let distance_m = parse_value(Field::DistanceM, &self.distance)?;
        let num_walls = parse_walls(&self.walls)?;
        let frequency_mhz = parse_value(Field::FrequencyMhz, &self.frequency)?;
        Ok(InputRecord::new(
            self.env,
            distance_m,
            num_walls,
            self.metal.is_present(),
            frequency_mhz,
        ))
    }

    /// Advisories for whatever fields currently parse, so warnings show
    /// while typing.
    pub fn advisories(&self) -> Vec<Advisory> {
        [Field::DistanceM, Field::NumWalls, Field::FrequencyMhz]
            .into_iter()
            .filter_map(|field| {
                parse_value(field, self.text(field))
                    .ok()
                    .map(|value| FieldSpec::spec_for(field).check(value))
            })
            .flatten()
            .collect()
    }
}

fn parse_walls(text: &str) -> Result<i64, String> {
    text.trim().parse::<i64>().map_err(|_| {
        format!(
            "{} must be a whole number, got '{}'",
            FieldSpec::spec_for(Field::NumWalls).label,
            text.trim()
        )
    })
}

fn parse_value(field: Field, text: &str) -> Result<f64, String> {
    if field == Field::NumWalls {
        return parse_walls(text).map(|walls| walls as f64);
    }
    parse_finite(text).map_err(|_| {
        format!(
            "{} must be a number, got '{}'",
            FieldSpec::spec_for(field).label,
            text.trim()
        )
    })
}

fn format_value(field: Field, value: f64) -> String {
    match field {
        Field::NumWalls => format!("{}", value as i64),
        _ if value.fract() == 0.0 => format!("{value:.1}"),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build_reference_record() {
        let form = FormState::default();
        assert_eq!(form.distance, "100.0");
        assert_eq!(form.walls, "0");
        assert_eq!(form.frequency, "2400.0");
        assert_eq!(form.to_record().unwrap(), InputRecord::default());
    }

    #[test]
    fn out_of_range_values_still_submit() {
        let mut form = FormState::default();
        form.update_field(Field::DistanceM, "2500".into());
        form.update_field(Field::NumWalls, "55".into());
        form.metal = MetalObstruction::Yes;

        let record = form.to_record().unwrap();
        assert_eq!(record.distance_m, 2500.0);
        assert_eq!(record.num_walls, 55);
        assert!(record.has_metal);
        assert_eq!(form.advisories().len(), 4);
    }

    #[test]
    fn unparsable_text_is_a_form_error() {
        let mut form = FormState::default();
        form.update_field(Field::FrequencyMhz, "2.4 GHz".into());
        let err = form.to_record().unwrap_err();
        assert!(err.starts_with("Frequency (MHz) must be a number"));

        form.update_field(Field::FrequencyMhz, "2400".into());
        form.update_field(Field::NumWalls, "2.5".into());
        assert!(form.to_record().is_err());
    }

    #[test]
    fn live_advisories_skip_fields_being_edited() {
        let mut form = FormState::default();
        form.update_field(Field::DistanceM, "".into());
        form.update_field(Field::FrequencyMhz, "5000".into());
        let advisories = form.advisories();
        assert_eq!(advisories.len(), 1);
        assert_eq!(advisories[0].field, Field::FrequencyMhz);
    }

    #[test]
    fn step_uses_declared_increment_without_clamping() {
        let mut form = FormState::default();
        form.step(Field::FrequencyMhz, StepDirection::Up);
        assert_eq!(form.frequency, "2410.0");

        form.step(Field::NumWalls, StepDirection::Down);
        assert_eq!(form.walls, "-1");

        form.update_field(Field::DistanceM, "abc".into());
        form.step(Field::DistanceM, StepDirection::Up);
        assert_eq!(form.distance, "101.0");
    }

    #[test]
    fn non_finite_text_is_a_form_error() {
        let mut form = FormState::default();
        form.update_field(Field::DistanceM, "NaN".into());
        assert_eq!(
            form.to_record().unwrap_err(),
            "Distance (m) must be a number, got 'NaN'"
        );
    }
}
