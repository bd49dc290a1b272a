use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, FormData, HtmlAudioElement, HtmlCanvasElement, HtmlInputElement};

use crate::chart::{draw, manager, palette};
use crate::format::{self, Feedback};
use crate::net;
use crate::state::AppState;
use crate::types::{MetricsResponse, ResultChartData, ScoreSeries, SongRef, UploadOutcome};
use crate::upload::{self, PracticeTake};

const METRICS_URL_PREFIX: &str = "/exercise/ajax/metrics/";
const UPLOAD_REFERENCE_URL: &str = "/exercise/ajax/upload_reference/";
const DELETE_URL_PREFIX: &str = "/exercise/delete/";
const RESULT_DATA_ISLAND: &str = "chartjsResultData";
const SCORE_CANVAS_ID: &str = "scoreChart";
const RESULT_CHART_HEIGHT: u32 = 220;

/// Built-in reference pieces; uploads append to this list.
const BUILTIN_REFERENCES: [(&str, &str); 3] = [
    ("ref_fur_elise.mp3", "برای الیزه (بتهوون)"),
    ("ref_nocturne_op9_no2.mp3", "نکتورن اپ. ۹ شماره ۲ (شوپن)"),
    ("ref_turkish_march.mp3", "مارش ترک (موتسارت)"),
];

#[component]
pub fn ExercisePage() -> impl IntoView {
    let state = expect_context::<AppState>();

    if state.songs.get_untracked().is_empty() {
        state.songs.set(
            BUILTIN_REFERENCES
                .iter()
                .map(|(reference, title)| SongRef {
                    reference: reference.to_string(),
                    title: title.to_string(),
                    uploaded: false,
                })
                .collect(),
        );
    }

    let result_data = embedded_result_data();

    let drag_over = RwSignal::new(false);
    let reference_uploading = RwSignal::new(false);

    let practice_input = NodeRef::<leptos::html::Input>::new();
    let reference_input = NodeRef::<leptos::html::Input>::new();
    let player_ref = NodeRef::<leptos::html::Audio>::new();
    let score_canvas = NodeRef::<leptos::html::Canvas>::new();
    let timing_canvas = NodeRef::<leptos::html::Canvas>::new();
    let chroma_canvas = NodeRef::<leptos::html::Canvas>::new();

    // Keep the score chart in step with the fetched series; an empty series
    // clears the plot and the panel is hidden below.
    Effect::new(move || {
        let series = state.series.get();
        let Some(canvas_el) = score_canvas.get() else { return };
        let canvas: &HtmlCanvasElement = canvas_el.as_ref();
        manager::update(canvas, series);
    });
    on_cleanup(move || manager::release(SCORE_CANVAS_ID));

    // Server-rendered comparison result, when this page follows an analysis.
    {
        let result_data = result_data.clone();
        Effect::new(move || {
            let Some(data) = result_data.clone() else { return };
            let pal = palette::palette(state.theme.get());
            if data.has_onsets() {
                if let Some(canvas_el) = timing_canvas.get() {
                    let canvas: &HtmlCanvasElement = canvas_el.as_ref();
                    draw::size_to_container(canvas, RESULT_CHART_HEIGHT);
                    draw::draw_onset_chart(canvas, &data.ref_onsets, &data.user_onsets, pal);
                }
            }
            if data.has_chroma() {
                if let Some(canvas_el) = chroma_canvas.get() {
                    let canvas: &HtmlCanvasElement = canvas_el.as_ref();
                    draw::size_to_container(canvas, RESULT_CHART_HEIGHT);
                    let labels: Vec<String> =
                        palette::CHROMA_LABELS.iter().map(|l| l.to_string()).collect();
                    let colors: Vec<String> = (0..labels.len())
                        .map(palette::chroma_bin_color)
                        .collect();
                    draw::draw_bar_chart(canvas, &labels, &data.chroma_diff_means(), &colors, pal);
                }
            }
        });
    }

    // Play the freshly picked practice recording.
    Effect::new(move || {
        let Some(take) = state.practice_take.get() else { return };
        let Some(player_el) = player_ref.get() else { return };
        let audio: &HtmlAudioElement = player_el.as_ref();
        audio.set_src(take.url.as_str());
        let _ = audio.play();
    });

    let on_practice_change = move |ev: web_sys::Event| {
        let Some(target) = ev.target() else { return };
        let input: HtmlInputElement = target.unchecked_into();
        handle_practice_file(state, upload::first_audio_file(input.files()));
    };

    let on_box_click = move |_| {
        if let Some(input) = practice_input.get() {
            let el: &HtmlInputElement = input.as_ref();
            // Reset so the same file can be re-picked.
            el.set_value("");
            el.click();
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        drag_over.set(true);
    };
    let on_dragleave = move |ev: DragEvent| {
        ev.prevent_default();
        drag_over.set(false);
    };
    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        drag_over.set(false);
        let files = ev.data_transfer().and_then(|dt| dt.files());
        // Only the first file counts, and only audio; anything else is
        // ignored without feedback, as the page always has.
        handle_practice_file(state, upload::first_audio_file(files));
    };

    let on_reference_card_click = move |_| {
        if let Some(input) = reference_input.get() {
            let el: &HtmlInputElement = input.as_ref();
            el.set_value("");
            el.click();
        }
    };

    let on_reference_change = move |ev: web_sys::Event| {
        let Some(target) = ev.target() else { return };
        let input: HtmlInputElement = target.unchecked_into();
        let Some(file) = upload::first_audio_file(input.files()) else { return };
        reference_uploading.set(true);
        spawn_local(async move {
            upload_reference(state, file).await;
            reference_uploading.set(false);
        });
    };

    let upload_box_class = move || {
        if drag_over.get() {
            "upload-box drag-over"
        } else {
            "upload-box"
        }
    };

    let metrics_visible = move || !state.series.get().is_empty();
    let csrf_value = net::csrf_token().unwrap_or_default();

    view! {
        <section class="exercise">
            <h1>"تمرین"</h1>

            <div class="song-list">
                {move || {
                    state
                        .songs
                        .get()
                        .into_iter()
                        .map(|song| {
                            let reference = song.reference.clone();
                            let card_reference = reference.clone();
                            let card_class = move || {
                                if state.selected_reference.get().as_deref()
                                    == Some(card_reference.as_str())
                                {
                                    "song-card selected-song"
                                } else {
                                    "song-card"
                                }
                            };
                            let on_select = move |ev: web_sys::MouseEvent| {
                                ev.prevent_default();
                                let reference = reference.clone();
                                state.selected_reference.set(Some(reference.clone()));
                                spawn_local(fetch_metrics(state, reference));
                            };
                            view! {
                                <div class=card_class>
                                    <span class="song-title">{song.title.clone()}</span>
                                    {song.uploaded.then(|| {
                                        view! { <span class="song-badge">"بارگذاری شده"</span> }
                                    })}
                                    <button class="select-btn" on:click=on_select>
                                        "انتخاب"
                                    </button>
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()
                }}

                <div
                    id="referenceUploadCard"
                    class="song-card upload-card"
                    on:click=on_reference_card_click
                >
                    <input
                        node_ref=reference_input
                        id="id_reference_audio"
                        type="file"
                        accept="audio/*"
                        style="display:none"
                        on:click=move |ev: web_sys::MouseEvent| ev.stop_propagation()
                        on:change=on_reference_change
                    />
                    <span class="song-title">
                        {move || {
                            if reference_uploading.get() {
                                "در حال بارگذاری…"
                            } else {
                                "بارگذاری قطعه مرجع"
                            }
                        }}
                    </span>
                </div>
            </div>

            <form
                id="practice-form"
                action="/exercise/"
                method="post"
                enctype="multipart/form-data"
            >
                <input type="hidden" name="csrfmiddlewaretoken" value=csrf_value />
                <input
                    type="hidden"
                    id="selectedReferenceInput"
                    name="selected_reference"
                    prop:value=move || state.selected_reference.get().unwrap_or_default()
                />

                <div
                    id="practiceUpload"
                    class=upload_box_class
                    on:click=on_box_click
                    on:dragover=on_dragover
                    on:dragleave=on_dragleave
                    on:drop=on_drop
                >
                    <input
                        node_ref=practice_input
                        id="id_user_audio"
                        type="file"
                        name="user_audio"
                        accept="audio/*"
                        style="display:none"
                        on:click=move |ev: web_sys::MouseEvent| ev.stop_propagation()
                        on:change=on_practice_change
                    />
                    <p>"ضبط تمرین خود را اینجا رها کنید یا کلیک کنید"</p>
                    <span id="userFileName" class="file-name">
                        {move || {
                            state
                                .practice_take
                                .get()
                                .map(|take| take.file_name)
                                .unwrap_or_default()
                        }}
                    </span>
                </div>

                <button type="submit" class="cta">"ارسال برای تحلیل"</button>
            </form>

            <audio id="audioPlayer" controls=true node_ref=player_ref></audio>

            {result_data.is_some().then(|| {
                view! {
                    <div class="result-charts">
                        <figure>
                            <figcaption>"مقایسه زمان‌بندی اجرا"</figcaption>
                            <canvas id="timingCanvas" node_ref=timing_canvas></canvas>
                        </figure>
                        <figure>
                            <figcaption>"اختلاف نت‌ها (کرما)"</figcaption>
                            <canvas id="noteCanvas" node_ref=chroma_canvas></canvas>
                        </figure>
                    </div>
                }
            })}

            <div
                class="metrics-panel"
                style:display=move || if metrics_visible() { "block" } else { "none" }
            >
                <h2>"روند پیشرفت"</h2>
                {move || state.metrics_loading.get().then(|| {
                    view! { <div class="loading-spinner"></div> }
                })}
                <canvas id=SCORE_CANVAS_ID node_ref=score_canvas></canvas>
                {move || {
                    state.series.get().latest_overall().map(|score| {
                        let band = Feedback::for_score(score);
                        view! {
                            <p class=band.css_class()>
                                <strong>{format::format_score(score)}</strong>
                                " · "
                                {band.message()}
                            </p>
                        }
                    })
                }}
                <button
                    class="delete-history"
                    on:click=move |_| {
                        if let Some(reference) = state.selected_reference.get_untracked() {
                            spawn_local(delete_exercise(state, reference));
                        }
                    }
                >
                    "حذف سابقه تمرین"
                </button>
            </div>
        </section>
    }
}

/// Parse the JSON island the server embeds after an analysis run.
fn embedded_result_data() -> Option<ResultChartData> {
    let el = web_sys::window()?
        .document()?
        .get_element_by_id(RESULT_DATA_ISLAND)?;
    let text = el.text_content()?;
    match serde_json::from_str(&text) {
        Ok(data) => Some(data),
        Err(e) => {
            log::warn!("Result chart data unparseable: {e}");
            None
        }
    }
}

fn handle_practice_file(state: AppState, file: Option<web_sys::File>) {
    let Some(file) = file else { return };
    match PracticeTake::from_file(&file) {
        // Replacing the take drops (and revokes) the previous object URL.
        Ok(take) => state.practice_take.set(Some(take)),
        Err(e) => {
            log::error!("Could not open practice recording: {e}");
            state.show_error_toast("خطا", "فایل صوتی قابل خواندن نیست.");
        }
    }
}

async fn fetch_metrics(state: AppState, exercise_id: String) {
    state.metrics_loading.set(true);
    let url = format!("{METRICS_URL_PREFIX}{exercise_id}/");
    match net::get(&url).await {
        Ok(reply) if reply.ok => match serde_json::from_str::<MetricsResponse>(&reply.body) {
            Ok(parsed) if parsed.success => {
                log::info!(
                    "Loaded {} metric records for {exercise_id}",
                    parsed.metrics.len()
                );
                state.series.set(ScoreSeries::from_records(&parsed.metrics));
            }
            Ok(_) => {
                state.series.set(ScoreSeries::default());
            }
            Err(e) => {
                log::warn!("Metrics response unparseable: {e}");
                state.series.set(ScoreSeries::default());
                state.show_error_toast("خطا", "نتایج تمرین قابل خواندن نبود.");
            }
        },
        Ok(reply) => {
            log::warn!("Metrics fetch returned HTTP {}", reply.status);
            state.series.set(ScoreSeries::default());
            state.show_error_toast("خطا", "دریافت نتایج تمرین ناموفق بود.");
        }
        Err(e) => {
            log::error!("Metrics fetch failed: {e}");
            state.show_error_toast("خطا", "ارتباط با سرور برقرار نشد.");
        }
    }
    state.metrics_loading.set(false);
}

async fn upload_reference(state: AppState, file: web_sys::File) {
    let form = match FormData::new() {
        Ok(form) => form,
        Err(e) => {
            log::error!("FormData unavailable: {e:?}");
            return;
        }
    };
    if form
        .append_with_blob_and_filename("reference_audio", &file, &file.name())
        .is_err()
    {
        log::error!("Could not attach reference audio to form");
        return;
    }

    match net::post_form(UPLOAD_REFERENCE_URL, &form, true).await {
        Ok(reply) if reply.ok => match serde_json::from_str::<UploadOutcome>(&reply.body) {
            Ok(outcome) if outcome.success => {
                let Some(filename) = outcome.filename else {
                    log::warn!("Upload succeeded without a filename");
                    return;
                };
                state.songs.update(|songs| {
                    songs.push(SongRef {
                        title: filename.clone(),
                        reference: filename,
                        uploaded: true,
                    });
                });
                state.show_success_toast("موفقیت", "قطعه مرجع بارگذاری شد.");
            }
            Ok(outcome) => {
                let message = outcome
                    .error
                    .unwrap_or_else(|| "بارگذاری قطعه مرجع ناموفق بود.".to_string());
                state.show_error_toast("خطا", message);
            }
            Err(e) => {
                log::warn!("Upload response unparseable: {e}");
                state.show_error_toast("خطا", "پاسخ سرور قابل خواندن نبود.");
            }
        },
        Ok(reply) => {
            log::warn!("Reference upload returned HTTP {}", reply.status);
            state.show_error_toast("خطا", "بارگذاری قطعه مرجع ناموفق بود.");
        }
        Err(e) => {
            log::error!("Reference upload failed: {e}");
            state.show_error_toast("خطا", "ارتباط با سرور برقرار نشد.");
        }
    }
}

async fn delete_exercise(state: AppState, exercise_id: String) {
    let Ok(form) = FormData::new() else { return };
    let url = format!("{DELETE_URL_PREFIX}{exercise_id}/");
    match net::post_form(&url, &form, true).await {
        Ok(reply) if reply.ok => {
            state.series.set(ScoreSeries::default());
            state.show_success_toast("موفقیت", "سابقه تمرین حذف شد.");
        }
        Ok(reply) => {
            log::warn!("Exercise delete returned HTTP {}", reply.status);
            state.show_error_toast("خطا", "حذف سابقه تمرین ناموفق بود.");
        }
        Err(e) => {
            log::error!("Exercise delete failed: {e}");
            state.show_error_toast("خطا", "ارتباط با سرور برقرار نشد.");
        }
    }
}
