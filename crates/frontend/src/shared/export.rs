/// Скачивание готовых файлов экспорта в браузере
use contracts::usecases::u501_export_report::ExportedFile;
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

/// data: URL из base64-содержимого файла
pub fn data_url(content_type: &str, content_base64: &str) -> String {
    format!("data:{};base64,{}", content_type, content_base64)
}

/// Инициирует скачивание файла, полученного от backend
pub fn download_exported_file(file: &ExportedFile) -> Result<(), String> {
    if file.content_base64.is_empty() {
        return Err("Пустой файл".to_string());
    }
    let url = data_url(&file.content_type, &file.content_base64);
    download_url(&url, &file.file_name)
}

/// Скачивание через временную ссылку
fn download_url(url: &str, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;
    let body = document.body().ok_or("No body element")?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    // Добавляем в DOM, кликаем и удаляем
    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Ok(())
}
