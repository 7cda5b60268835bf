//! Client-side script blocks for interactive charts.
//!
//! Every script is self-contained and fails soft: a missing library, a
//! missing shared data element, unparseable JSON, or any exception while
//! drawing replaces the chart container's content with a visible error
//! message instead of aborting the page.

/// Character substituted for `'` inside embedded JSON string literals; the
/// script turns it back into `'` before parsing.
pub const QUOTE_PLACEHOLDER: char = '\u{2019}';

const PLOTLY_CONFIG: &str = "{responsive: true, displayModeBar: true, displaylogo: false, modeBarButtonsToRemove: ['pan2d', 'lasso2d', 'select2d']}";

/// Shared helper that writes an error paragraph into the chart container.
fn show_error_fn(chart_id: &str) -> String {
    format!(
        r#"    var chartId = {chart_id};
    function showError(message) {{
        var container = document.getElementById(chartId);
        if (!container) {{ return; }}
        var p = document.createElement('p');
        p.style.color = 'red';
        p.textContent = message;
        container.innerHTML = '';
        container.appendChild(p);
    }}"#,
        chart_id = js_string(chart_id)
    )
}

/// Quotes `text` as a JavaScript string literal.
///
/// `'` is replaced with [`QUOTE_PLACEHOLDER`], `"` and `\` are
/// backslash-escaped, line terminators become escapes and `</` is broken
/// up so the literal cannot close the enclosing script element.
///
/// A `’` already present in `text` comes back as `'` once the script
/// reverses the placeholder.
pub fn js_string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\'' => out.push(QUOTE_PLACEHOLDER),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out.replace("</", "<\\/")
}

/// Quotes an identifier or message as a JavaScript string literal without
/// the quote placeholder.
pub(crate) fn js_string(text: &str) -> String {
    // serde_json string escaping is valid JavaScript
    escape_script_json(&serde_json::Value::from(text).to_string())
}

/// Makes JSON text safe to embed as code inside a `<script>` element.
pub fn escape_script_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

/// Script drawing a Plotly figure whose JSON is embedded as a string
/// literal and parsed on the client.
pub fn plotly_literal_script(chart_id: &str, figure_json: &str) -> String {
    format!(
        r#"<script type="text/javascript">
(function() {{
{show_error}
    try {{
        if (typeof Plotly === 'undefined') {{
            showError('Error: Plotly.js is not loaded');
            return;
        }}
        var plotlyData = {literal};
        var figure = JSON.parse(plotlyData.replace(/\u2019/g, "'"));
        if (!figure.layout) {{ figure.layout = {{}}; }}
        figure.layout.autosize = true;
        Plotly.newPlot(chartId, figure.data, figure.layout, {config});
    }} catch (error) {{
        console.error('Error rendering Plotly chart:', error);
        showError('Error rendering chart: ' + error.message);
    }}
}})();
</script>"#,
        show_error = show_error_fn(chart_id),
        literal = js_string_literal(figure_json),
        config = PLOTLY_CONFIG,
    )
}

/// Script drawing a Plotly figure from a shared data element.
///
/// `config_json` is the caller's figure (already safe to embed) or `None`;
/// with a figure the shared payload is merged into the first trace's
/// `geojson`, without one a default world choropleth is drawn.
pub fn plotly_shared_script(
    chart_id: &str,
    data_element_id: &str,
    config_json: Option<&str>,
) -> String {
    format!(
        r#"<script type="text/javascript">
(function() {{
{show_error}
    var dataElementId = {data_element_id};
    try {{
        if (typeof Plotly === 'undefined') {{
            showError('Error: Plotly.js is not loaded');
            return;
        }}
        var sharedDataElement = document.getElementById(dataElementId);
        if (!sharedDataElement) {{
            throw new Error('Shared data element not found with ID: ' + dataElementId);
        }}
        var sharedData = JSON.parse(sharedDataElement.textContent);
        var plotlyConfig = {config};
        var figure;
        if (plotlyConfig && typeof plotlyConfig === 'object') {{
            figure = plotlyConfig;
            if (sharedData.features && figure.data && figure.data.length > 0) {{
                figure.data[0].geojson = sharedData;
            }}
        }} else {{
            figure = {{
                data: [{{type: 'choropleth', geojson: sharedData, locations: [], z: []}}],
                layout: {{
                    geo: {{projection: {{type: 'natural earth'}}, scope: 'world'}},
                    margin: {{r: 0, t: 0, l: 0, b: 0}}
                }}
            }};
        }}
        if (!figure.layout) {{ figure.layout = {{}}; }}
        figure.layout.autosize = true;
        Plotly.newPlot(chartId, figure.data, figure.layout, {plotly_config});
    }} catch (error) {{
        console.error('Error rendering Plotly chart:', error);
        showError('Error rendering chart: ' + error.message);
    }}
}})();
</script>"#,
        show_error = show_error_fn(chart_id),
        data_element_id = js_string(data_element_id),
        config = config_json.unwrap_or("null"),
        plotly_config = PLOTLY_CONFIG,
    )
}

/// Script drawing a Plotly figure whose choropleth traces all read their
/// `geojson` from one document-global element.
pub fn plotly_global_geojson_script(
    chart_id: &str,
    geojson_element_id: &str,
    figure_json: &str,
) -> String {
    format!(
        r#"<script type="text/javascript">
(function() {{
{show_error}
    var geojsonElementId = {geojson_element_id};
    try {{
        if (typeof Plotly === 'undefined') {{
            showError('Error: Plotly.js is not loaded');
            return;
        }}
        var geojsonElement = document.getElementById(geojsonElementId);
        if (!geojsonElement) {{
            console.error('GeoJSON element not found: ' + geojsonElementId);
            showError('Error: GeoJSON not found (ID: ' + geojsonElementId + ')');
            return;
        }}
        var geojson = JSON.parse(geojsonElement.textContent);
        var figure = {figure};
        (figure.data || []).forEach(function(trace) {{
            if (trace.type === 'choropleth') {{
                trace.geojson = geojson;
            }}
        }});
        if (!figure.layout) {{ figure.layout = {{}}; }}
        figure.layout.autosize = true;
        Plotly.newPlot(chartId, figure.data, figure.layout, {plotly_config});
    }} catch (error) {{
        console.error('Error rendering Plotly chart:', error);
        showError('Error rendering chart: ' + error.message);
    }}
}})();
</script>"#,
        show_error = show_error_fn(chart_id),
        geojson_element_id = js_string(geojson_element_id),
        figure = figure_json,
        plotly_config = PLOTLY_CONFIG,
    )
}

/// Script embedding a Vega-Lite spec with `vegaEmbed`.
///
/// `spec_expr` is a JavaScript expression evaluating to the spec.
pub fn vega_lite_script(chart_id: &str, spec_expr: &str, renderer: &str) -> String {
    format!(
        r#"<script type="text/javascript">
(function() {{
{show_error}
    try {{
        if (typeof vegaEmbed === 'undefined') {{
            showError('Error: vega-embed is not loaded');
            return;
        }}
        var spec = {spec};
        vegaEmbed('#' + chartId, spec, {{renderer: {renderer}}}).catch(function(error) {{
            console.error('Error rendering Vega-Lite chart:', error);
            showError('Error rendering chart: ' + error.message);
        }});
    }} catch (error) {{
        console.error('Error rendering Vega-Lite chart:', error);
        showError('Error rendering chart: ' + error.message);
    }}
}})();
</script>"#,
        show_error = show_error_fn(chart_id),
        spec = spec_expr,
        renderer = js_string(renderer),
    )
}
