use primer_nn::Prediction;

use crate::InspectorState;

/// Renders the prediction page for one sample: the image, true vs predicted
/// label, and a probability bar per class.
pub fn sample_page(
    state: &InspectorState,
    index: usize,
    truth: usize,
    prediction: &Prediction,
) -> String {
    let total = state.dataset.len();
    let labels = &state.class_labels;
    let correct = prediction.class == truth;

    let verdict = if correct {
        format!(
            "<span class=\"ok\">predicted {} — correct</span>",
            labels[prediction.class]
        )
    } else {
        format!(
            "<span class=\"bad\">predicted {} — should be {}</span>",
            labels[prediction.class], labels[truth]
        )
    };

    let mut bars = String::new();
    for (i, &p) in prediction.probabilities.iter().enumerate() {
        let pct = p.clamp(0.0, 1.0) * 100.0;
        let class = if i == prediction.class { "bar best" } else { "bar" };
        bars.push_str(&format!(
            "<div class=\"row\">\
               <span class=\"label\">{}</span>\
               <div class=\"track\"><div class=\"{}\" style=\"width:{:.1}%\"></div></div>\
               <span class=\"pct\">{:.1}%</span>\
             </div>\n",
            labels[i], class, pct, pct
        ));
    }

    let prev = index.saturating_sub(1);
    let next = (index + 1).min(total.saturating_sub(1));

    format!(
        "<!DOCTYPE html>\n\
<html>\n\
<head>\n\
<meta charset=\"utf-8\">\n\
<title>primer-nn inspector — sample {index}</title>\n\
<style>\n\
  body {{ font-family: monospace; background: #14161a; color: #d7dae0; \
          max-width: 640px; margin: 2rem auto; }}\n\
  h1 {{ font-size: 1.1rem; }}\n\
  .sample {{ display: flex; gap: 2rem; align-items: flex-start; }}\n\
  img {{ width: 196px; image-rendering: pixelated; border: 1px solid #3a3f47; \
         background: #000; }}\n\
  .ok {{ color: #6fcf6f; }}\n\
  .bad {{ color: #e06c60; }}\n\
  .row {{ display: flex; align-items: center; gap: 0.5rem; margin: 2px 0; }}\n\
  .label {{ width: 3rem; text-align: right; }}\n\
  .track {{ width: 240px; height: 14px; background: #22252b; }}\n\
  .bar {{ height: 100%; background: #4a8fd4; }}\n\
  .bar.best {{ background: #6fcf6f; }}\n\
  .pct {{ width: 4rem; }}\n\
  nav {{ margin: 1rem 0; }}\n\
  nav a {{ color: #4a8fd4; margin-right: 1rem; }}\n\
</style>\n\
</head>\n\
<body>\n\
<h1>primer-nn inspector</h1>\n\
<nav>\n\
  <a href=\"/sample/{prev}\">&larr; prev</a>\n\
  <a href=\"/sample/{next}\">next &rarr;</a>\n\
  <a href=\"/random\">random</a>\n\
</nav>\n\
<p>Sample {index} of {total} — true label <strong>{truth_label}</strong>, {verdict}</p>\n\
<div class=\"sample\">\n\
  <img src=\"/sample/{index}/image.png\" alt=\"sample {index}\">\n\
  <div>\n{bars}  </div>\n\
</div>\n\
</body>\n\
</html>\n",
        index = index,
        total = total,
        truth_label = labels[truth],
        verdict = verdict,
        prev = prev,
        next = next,
        bars = bars,
    )
}
