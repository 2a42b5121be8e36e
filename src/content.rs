use uuid::Uuid;

use crate::models::{
    CyclePhase, ExerciseCategory, HealthTip, MindfulnessExercise, TipCategory,
};

/// Catalog items that may target a specific cycle phase.
pub trait PhaseTagged {
    fn target_phase(&self) -> Option<CyclePhase>;
}

impl PhaseTagged for HealthTip {
    fn target_phase(&self) -> Option<CyclePhase> {
        self.relevant_phase
    }
}

impl PhaseTagged for MindfulnessExercise {
    // Exercises are useful in any phase.
    fn target_phase(&self) -> Option<CyclePhase> {
        None
    }
}

/// Pick the catalog items worth showing for the current phase.
///
/// Lazy and restartable: at most 3 items, in catalog order, keeping items
/// tagged for this phase or untagged. An `Unknown` phase disables filtering
/// and yields the first 3 items as generic picks.
pub fn relevant_content<T: PhaseTagged>(
    phase: CyclePhase,
    catalog: &[T],
) -> impl Iterator<Item = &T> + '_ {
    catalog
        .iter()
        .filter(move |item| {
            phase == CyclePhase::Unknown
                || item.target_phase().map_or(true, |tag| tag == phase)
        })
        .take(3)
}

/// Built-in mindfulness exercises, seeded into a fresh vault.
pub fn default_exercises() -> Vec<MindfulnessExercise> {
    let exercise = |title: &str, description: &str, duration_minutes, category, content: &str| {
        MindfulnessExercise {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            duration_minutes,
            category,
            content: content.into(),
        }
    };

    vec![
        exercise(
            "Deep Breathing Exercise",
            "A simple breathing technique to reduce stress and ease cramps",
            5,
            ExerciseCategory::Breathing,
            "Find a comfortable position. Breathe in slowly through your nose for 4 counts. \
             Hold your breath for 2 counts. Exhale slowly through your mouth for 6 counts. \
             Repeat for 5 minutes.",
        ),
        exercise(
            "Body Scan Meditation",
            "A gentle meditation to release tension during your cycle",
            10,
            ExerciseCategory::Meditation,
            "Lie down comfortably. Close your eyes. Beginning at your toes, slowly scan up \
             through your body, noticing any areas of tension or discomfort. Breathe into \
             these areas, visualizing tension melting away with each exhale.",
        ),
        exercise(
            "Gentle Stretching Routine",
            "Easy stretches to relieve period discomfort",
            7,
            ExerciseCategory::Stretching,
            "Child's pose: kneel and sit back on your heels, then extend arms forward and \
             rest your forehead on the floor. Hold for 30 seconds. Cat-cow stretch: on hands \
             and knees, alternate between arching and rounding your back. Repeat 10 times. \
             Butterfly stretch: sit with soles of feet together, knees out to sides. Hold \
             for 30 seconds.",
        ),
        exercise(
            "Progressive Muscle Relaxation",
            "Systematically relax your entire body",
            15,
            ExerciseCategory::Relaxation,
            "Starting with your toes, tense each muscle group for 5 seconds, then release \
             for 10 seconds. Work your way up through your body to your face. Notice the \
             difference between tension and relaxation.",
        ),
        exercise(
            "Mindful Walking Meditation",
            "A gentle walking meditation to ease cramps and boost mood",
            10,
            ExerciseCategory::Meditation,
            "Find a quiet space to walk slowly. Focus on each step, feeling your feet \
             connect with the ground. Notice the movement of your body, the rhythm of your \
             breath. If your mind wanders, gently bring it back to the sensation of walking.",
        ),
        exercise(
            "Calming Breath Work",
            "Advanced breathing technique for stress relief",
            8,
            ExerciseCategory::Breathing,
            "Sit comfortably. Inhale for 4 counts through your nose, hold for 4 counts, \
             exhale for 8 counts through your mouth. Feel your belly rise and fall. \
             Continue for 8 minutes.",
        ),
    ]
}

/// Built-in health tips, seeded into a fresh vault.
pub fn default_tips() -> Vec<HealthTip> {
    let tip = |title: &str, content: &str, category, relevant_phase| HealthTip {
        id: Uuid::new_v4(),
        title: title.into(),
        content: content.into(),
        category,
        relevant_phase,
    };

    vec![
        tip(
            "Stay Hydrated During Your Period",
            "Drinking plenty of water can help reduce bloating and cramps during \
             menstruation. Aim for 8-10 glasses daily. Consider warm water or herbal teas \
             like chamomile or ginger tea for additional benefits. Staying hydrated can \
             also help with headaches and fatigue commonly experienced during menstruation.",
            TipCategory::Period,
            Some(CyclePhase::Menstrual),
        ),
        tip(
            "Iron-Rich Foods for Menstruation",
            "During your period, include iron-rich foods like leafy greens, beans, and \
             lean meats to help replenish iron lost through bleeding. Combine these with \
             vitamin C-rich foods to enhance iron absorption. Good combinations include \
             spinach salad with citrus dressing or beans with bell peppers.",
            TipCategory::Nutrition,
            Some(CyclePhase::Menstrual),
        ),
        tip(
            "Exercise During Ovulation",
            "Your energy levels are naturally higher during ovulation. This is a great \
             time for more intense workouts or trying new activities. Consider \
             high-intensity interval training, dance classes, or strength training. \
             Listen to your body and stay hydrated during workouts.",
            TipCategory::Fitness,
            Some(CyclePhase::Ovulation),
        ),
        tip(
            "Supporting Mood During Luteal Phase",
            "The week before your period, serotonin levels may drop. Activities like \
             gentle exercise, sunlight exposure, and complex carbohydrates can help \
             support your mood. Practice self-care activities and consider meditation or \
             journaling to manage emotional changes.",
            TipCategory::Mental,
            Some(CyclePhase::Luteal),
        ),
        tip(
            "Sleep Hygiene Tips",
            "Quality sleep is crucial for hormonal balance. Create a relaxing bedtime \
             routine, avoid screens before bed, and keep your bedroom cool and dark. \
             Consider using a sleep tracking app to understand your patterns and optimize \
             your rest.",
            TipCategory::Sleep,
            None,
        ),
        tip(
            "Natural Pain Management",
            "For menstrual cramps, try natural remedies like heat therapy, gentle yoga, \
             or acupressure. A warm bath with Epsom salts can help relax muscles. Some \
             find relief with herbal teas like red raspberry leaf or chamomile. Always \
             consult your healthcare provider about persistent pain.",
            TipCategory::Period,
            Some(CyclePhase::Menstrual),
        ),
    ]
}
