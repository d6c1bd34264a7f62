pub const LIGHT_STYLESHEET: &str = "/static/light-mode.css";

// Placeholders are `{{name}}`; values are inserted already escaped.
pub const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Canary | File Type Check</title>
    <link id="current-theme" rel="stylesheet" href="{{stylesheet}}">
</head>
<body>
    <nav class="nav-links">
        <a href="#" id="theme-toggle-link">{{theme_label}}</a>
    </nav>
    <main>
        <form id="uploadForm" method="post" action="/check" enctype="multipart/form-data">
            <div id="dropZone" class="{{drop_zone_class}}">
                <input type="file" id="fileInput" name="file" hidden>
                <span id="fileNameDisplay" class="{{file_label_class}}">{{file_label}}</span>
            </div>
            <label><input type="checkbox" id="virustotal" name="virustotal" value="true"{{scan_checked}}> Also scan with VirusTotal</label>
            <button type="submit" id="submitButton" class="btn"{{submit_disabled}}>Check File</button>
        </form>
        <div id="loadingIndicator"{{loading_hidden}}>Analyzing file...</div>
        <div id="resultsContainer"{{results_hidden}}>
            <div id="resultContent">{{result_content}}</div>
        </div>
    </main>
</body>
</html>
"##;
