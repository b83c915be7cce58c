//! Fixed feature schema of the prediction form.
//!
//! Order matters: it defines both the widget order in the form and the
//! position of each value in the vector handed to the network.

pub const FEATURE_COUNT: usize = 12;

pub const FEATURES: [&str; FEATURE_COUNT] = [
    "Плотность, кг/м3",
    "модуль упругости, ГПа",
    "Количество отвердителя, м.%",
    "Содержание эпоксидных групп,%_2",
    "Температура вспышки, С_2",
    "Поверхностная плотность, г/м2",
    "Модуль упругости при растяжении, ГПа",
    "Прочность при растяжении, МПа",
    "Потребление смолы, г/м2",
    "Угол нашивки, град",
    "Шаг нашивки",
    "Плотность нашивки",
];

pub const TARGET: &str = "Соотношение матрица-наполнитель";
